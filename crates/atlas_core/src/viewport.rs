//! Viewport control: fit to visible markers, fly to a single project.

use std::time::Duration;

use shared::{LatLngBounds, ProjectId};
use tracing::debug;

use crate::{markers::MarkerIndex, surface::DisplaySurface};

pub const DEFAULT_FIT_PADDING: f64 = 0.2;
pub const DEFAULT_FLY_TO_ZOOM: f64 = 15.0;
pub const DEFAULT_FLY_TO_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    /// Fraction of the marker span added on every side when fitting.
    pub fit_padding: f64,
    pub fly_to_zoom: f64,
    pub fly_to_duration: Duration,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            fit_padding: DEFAULT_FIT_PADDING,
            fly_to_zoom: DEFAULT_FLY_TO_ZOOM,
            fly_to_duration: DEFAULT_FLY_TO_DURATION,
        }
    }
}

impl ViewportController {
    /// Frames every displayed overlay without animation. Leaves the view
    /// untouched and returns `None` when nothing is displayed.
    pub fn fit_to_visible<S: DisplaySurface>(
        &self,
        index: &MarkerIndex<S::Overlay>,
        surface: &mut S,
    ) -> Option<LatLngBounds> {
        let bounds = LatLngBounds::from_points(
            index
                .overlays()
                .map(|overlay| surface.overlay_position(overlay)),
        )?
        .pad(self.fit_padding);
        surface.fit_bounds(bounds, false);
        Some(bounds)
    }

    /// Animated recenter on one displayed project, opening its popup.
    /// Returns `false` without touching the surface if `id` is not displayed.
    pub fn zoom_to<S: DisplaySurface>(
        &self,
        id: &ProjectId,
        index: &MarkerIndex<S::Overlay>,
        surface: &mut S,
    ) -> bool {
        let Some(overlay) = index.get(id) else {
            debug!(project_id = %id, "zoom target is not displayed");
            return false;
        };
        let center = surface.overlay_position(overlay);
        surface.fly_to(center, self.fly_to_zoom, self.fly_to_duration);
        surface.open_popup(overlay);
        true
    }
}

#[cfg(test)]
#[path = "tests/viewport_tests.rs"]
mod tests;
