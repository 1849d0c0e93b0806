//! Map canvas: a Web Mercator viewport that paints project markers and
//! implements [`DisplaySurface`] for the render orchestrator.

use std::{collections::BTreeMap, f64::consts::PI, time::Duration};

use atlas_core::{DisplaySurface, MarkerSpec, PopupContent, Rgb};
use eframe::egui;
use shared::{LatLng, LatLngBounds};

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_779_8;
const MIN_ZOOM: f64 = 1.0;
const SCROLL_ZOOM_RATE: f64 = 0.004;
const HIT_SLOP_PX: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapOverlay(u64);

struct OverlayState {
    marker: MarkerSpec,
    on_layer: bool,
}

struct Flight {
    from_center: LatLng,
    from_zoom: f64,
    to_center: LatLng,
    to_zoom: f64,
    duration: Duration,
    started_at: Option<f64>,
}

pub struct MapSurface {
    next_overlay: u64,
    overlays: BTreeMap<MapOverlay, OverlayState>,
    center: LatLng,
    zoom: f64,
    max_zoom: f64,
    canvas: egui::Vec2,
    pending_fit: Option<LatLngBounds>,
    flight: Option<Flight>,
    popup: Option<MapOverlay>,
}

/// Pixel position at `zoom` in the global Web Mercator plane.
fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2_f64.powf(zoom);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let scale = TILE_SIZE * 2_f64.powf(zoom);
    let lng = x / scale * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / scale);
    LatLng::new(n.sinh().atan().to_degrees(), lng)
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

impl MapSurface {
    pub fn new(center: LatLng, zoom: f64, max_zoom: f64) -> Self {
        Self {
            next_overlay: 1,
            overlays: BTreeMap::new(),
            center,
            zoom,
            max_zoom,
            canvas: egui::Vec2::ZERO,
            pending_fit: None,
            flight: None,
            popup: None,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Largest whole zoom level at which `bounds` fits the canvas.
    fn zoom_to_fit(&self, bounds: &LatLngBounds) -> f64 {
        let (west, north) = project(
            LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
            0.0,
        );
        let (east, south) = project(
            LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
            0.0,
        );
        let width = (east - west).abs();
        let height = (south - north).abs();
        let zoom_x = if width > 0.0 {
            (self.canvas.x as f64 / width).log2()
        } else {
            self.max_zoom
        };
        let zoom_y = if height > 0.0 {
            (self.canvas.y as f64 / height).log2()
        } else {
            self.max_zoom
        };
        zoom_x.min(zoom_y).floor().clamp(MIN_ZOOM, self.max_zoom)
    }

    fn apply_fit(&mut self, bounds: LatLngBounds) {
        self.center = bounds.center();
        self.zoom = self.zoom_to_fit(&bounds);
        tracing::debug!(
            lat = self.center.lat,
            lng = self.center.lng,
            zoom = self.zoom,
            "viewport framed"
        );
    }

    fn to_screen(&self, rect: egui::Rect, point: LatLng) -> egui::Pos2 {
        let (cx, cy) = project(self.center, self.zoom);
        let (px, py) = project(point, self.zoom);
        rect.center() + egui::vec2((px - cx) as f32, (py - cy) as f32)
    }

    fn advance_flight(&mut self, now: f64) -> bool {
        let Some(flight) = self.flight.as_mut() else {
            return false;
        };
        let started_at = *flight.started_at.get_or_insert(now);
        let total = flight.duration.as_secs_f64();
        let t = if total > 0.0 {
            ((now - started_at) / total).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.center = flight.to_center;
            self.zoom = flight.to_zoom;
            self.flight = None;
            return true;
        }
        let eased = ease_out_cubic(t);
        self.center = LatLng::new(
            flight.from_center.lat + (flight.to_center.lat - flight.from_center.lat) * eased,
            flight.from_center.lng + (flight.to_center.lng - flight.from_center.lng) * eased,
        );
        self.zoom = flight.from_zoom + (flight.to_zoom - flight.from_zoom) * eased;
        true
    }

    fn marker_at(&self, rect: egui::Rect, pos: egui::Pos2) -> Option<MapOverlay> {
        self.overlays
            .iter()
            .rev()
            .filter(|(_, state)| state.on_layer)
            .find(|(_, state)| {
                let center = self.to_screen(rect, state.marker.position);
                center.distance(pos) <= state.marker.style.radius_px + HIT_SLOP_PX
            })
            .map(|(handle, _)| *handle)
    }

    /// Paints the map into the remaining space and handles pan, zoom, and
    /// marker clicks.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.canvas = rect.size();

        if let Some(bounds) = self.pending_fit.take() {
            self.apply_fit(bounds);
        }
        if self.advance_flight(ui.input(|i| i.time)) {
            ui.ctx().request_repaint();
        }

        if response.dragged() {
            self.flight = None;
            let delta = response.drag_delta();
            let (cx, cy) = project(self.center, self.zoom);
            self.center = unproject(cx - delta.x as f64, cy - delta.y as f64, self.zoom);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
            if scroll != 0.0 {
                self.flight = None;
                self.zoom = (self.zoom + scroll * SCROLL_ZOOM_RATE).clamp(MIN_ZOOM, self.max_zoom);
            }
        }
        if response.clicked() {
            self.popup = response
                .interact_pointer_pos()
                .and_then(|pos| self.marker_at(rect, pos));
        }

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(226, 232, 236));
        self.paint_graticule(&painter, rect);

        for state in self.overlays.values().filter(|state| state.on_layer) {
            let center = self.to_screen(rect, state.marker.position);
            if !rect.expand(state.marker.style.radius_px).contains(center) {
                continue;
            }
            let style = state.marker.style;
            painter.circle(
                center,
                style.radius_px,
                color(style.fill),
                egui::Stroke::new(style.stroke_px, color(style.stroke)),
            );
        }

        painter.text(
            rect.right_bottom() - egui::vec2(6.0, 4.0),
            egui::Align2::RIGHT_BOTTOM,
            format!(
                "{:.4}, {:.4}  z{:.1}",
                self.center.lat, self.center.lng, self.zoom
            ),
            egui::FontId::monospace(11.0),
            egui::Color32::DARK_GRAY,
        );

        self.show_popup(ui.ctx(), rect);
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: egui::Rect) {
        let step = if self.zoom >= 12.0 {
            0.01
        } else if self.zoom >= 8.0 {
            0.1
        } else {
            1.0
        };
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(208, 216, 222));
        let top_left = {
            let (cx, cy) = project(self.center, self.zoom);
            unproject(
                cx - rect.width() as f64 / 2.0,
                cy - rect.height() as f64 / 2.0,
                self.zoom,
            )
        };
        let bottom_right = {
            let (cx, cy) = project(self.center, self.zoom);
            unproject(
                cx + rect.width() as f64 / 2.0,
                cy + rect.height() as f64 / 2.0,
                self.zoom,
            )
        };

        let mut lng = (top_left.lng / step).floor() * step;
        while lng <= bottom_right.lng {
            let x = self.to_screen(rect, LatLng::new(self.center.lat, lng)).x;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                stroke,
            );
            lng += step;
        }
        let mut lat = (bottom_right.lat / step).floor() * step;
        while lat <= top_left.lat {
            let y = self.to_screen(rect, LatLng::new(lat, self.center.lng)).y;
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                stroke,
            );
            lat += step;
        }
    }

    fn show_popup(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let Some(handle) = self.popup else {
            return;
        };
        let Some(state) = self.overlays.get(&handle) else {
            self.popup = None;
            return;
        };
        let anchor = self.to_screen(rect, state.marker.position);
        if !rect.contains(anchor) {
            return;
        }

        let mut close = false;
        egui::Area::new(egui::Id::new("project_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(anchor + egui::vec2(10.0, -10.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(280.0);
                    close = popup_contents(ui, &state.marker.popup);
                });
            });
        if close {
            self.popup = None;
        }
    }
}

/// Returns `true` when the close button was pressed.
fn popup_contents(ui: &mut egui::Ui, popup: &PopupContent) -> bool {
    let mut close = false;
    ui.horizontal(|ui| {
        ui.strong(&popup.title);
        if ui.small_button("×").clicked() {
            close = true;
        }
    });
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&popup.category).small().monospace());
        ui.label(egui::RichText::new(&popup.status).small().monospace());
    });
    ui.label(&popup.city);
    ui.label(format!("Budget: {}", popup.budget));
    ui.label(&popup.dates);
    if !popup.description.is_empty() {
        ui.label(egui::RichText::new(&popup.description).small());
    }
    ui.horizontal_wrapped(|ui| {
        for link in &popup.links {
            ui.hyperlink_to("link", link);
        }
    });
    close
}

impl DisplaySurface for MapSurface {
    type Overlay = MapOverlay;

    fn create_overlay(&mut self, marker: MarkerSpec) -> MapOverlay {
        let handle = MapOverlay(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.insert(
            handle,
            OverlayState {
                marker,
                on_layer: false,
            },
        );
        handle
    }

    fn update_overlay(&mut self, overlay: &mut MapOverlay, marker: MarkerSpec) {
        if let Some(state) = self.overlays.get_mut(overlay) {
            state.marker = marker;
        }
    }

    fn attach(&mut self, overlay: &MapOverlay) {
        if let Some(state) = self.overlays.get_mut(overlay) {
            state.on_layer = true;
        }
    }

    fn detach(&mut self, overlay: &MapOverlay) {
        self.overlays.remove(overlay);
        if self.popup == Some(*overlay) {
            self.popup = None;
        }
    }

    fn overlay_position(&self, overlay: &MapOverlay) -> LatLng {
        self.overlays
            .get(overlay)
            .map(|state| state.marker.position)
            .unwrap_or(self.center)
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, _animate: bool) {
        self.flight = None;
        if self.canvas.x > 0.0 && self.canvas.y > 0.0 {
            self.apply_fit(bounds);
        } else {
            // No frame painted yet; fit once the canvas size is known.
            self.pending_fit = Some(bounds);
        }
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) {
        self.pending_fit = None;
        self.flight = Some(Flight {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: center,
            to_zoom: zoom.min(self.max_zoom),
            duration,
            started_at: None,
        });
    }

    fn open_popup(&mut self, overlay: &MapOverlay) {
        if self.overlays.contains_key(overlay) {
            self.popup = Some(*overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_round_trips_charleston() {
        let point = LatLng::new(32.7749, -79.9496);
        let (x, y) = project(point, 12.0);
        let back = unproject(x, y, 12.0);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lng - point.lng).abs() < 1e-9);
    }

    #[test]
    fn fit_waits_for_canvas_size() {
        let mut map = MapSurface::new(LatLng::new(0.0, 0.0), 3.0, 19.0);
        let bounds = LatLngBounds::from_points([
            LatLng::new(32.77, -80.04),
            LatLng::new(32.90, -79.92),
        ])
        .expect("bounds");

        map.fit_bounds(bounds, false);
        assert_eq!(map.zoom(), 3.0);

        map.canvas = egui::vec2(800.0, 600.0);
        map.fit_bounds(bounds, false);
        assert_eq!(map.center(), bounds.center());
        // ~0.12 degrees across 800 px lands on a city-scale zoom.
        assert!((10.0..=13.0).contains(&map.zoom()), "zoom {}", map.zoom());
    }

    #[test]
    fn single_point_fit_uses_max_zoom() {
        let mut map = MapSurface::new(LatLng::new(0.0, 0.0), 3.0, 19.0);
        map.canvas = egui::vec2(800.0, 600.0);
        map.fit_bounds(LatLngBounds::from_point(LatLng::new(32.79, -79.95)), false);
        assert_eq!(map.zoom(), 19.0);
    }

    #[test]
    fn flight_reaches_target_after_duration() {
        let mut map = MapSurface::new(LatLng::new(32.78, -79.94), 12.0, 19.0);
        map.fly_to(LatLng::new(32.90, -80.04), 15.0, Duration::from_millis(600));
        assert!(map.advance_flight(10.0));
        assert_eq!(map.zoom(), 12.0);
        assert!(map.advance_flight(10.7));
        assert_eq!(map.zoom(), 15.0);
        assert_eq!(map.center(), LatLng::new(32.90, -80.04));
        assert!(!map.advance_flight(11.0));
    }
}
