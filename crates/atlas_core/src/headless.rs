//! A display surface with no window: keeps overlay state in memory and logs
//! every call. Backs the CLI and the render tests.

use std::{collections::BTreeMap, time::Duration};

use shared::{LatLng, LatLngBounds};

use crate::surface::{DisplaySurface, MarkerSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOverlay {
    pub marker: MarkerSpec,
    pub attached: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Create(OverlayHandle),
    Update(OverlayHandle),
    Attach(OverlayHandle),
    Detach(OverlayHandle),
    FitBounds { bounds: LatLngBounds, animate: bool },
    FlyTo { center: LatLng, zoom: f64, duration: Duration },
    OpenPopup(OverlayHandle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessView {
    pub center: LatLng,
    pub zoom: Option<f64>,
    pub bounds: Option<LatLngBounds>,
}

#[derive(Debug)]
pub struct HeadlessSurface {
    next_handle: u64,
    overlays: BTreeMap<OverlayHandle, HeadlessOverlay>,
    view: HeadlessView,
    open_popup: Option<OverlayHandle>,
    ops: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            next_handle: 1,
            overlays: BTreeMap::new(),
            view: HeadlessView {
                center,
                zoom: Some(zoom),
                bounds: None,
            },
            open_popup: None,
            ops: Vec::new(),
        }
    }

    pub fn view(&self) -> HeadlessView {
        self.view
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&HeadlessOverlay> {
        self.overlays.get(&handle)
    }

    /// Overlays currently on the layer.
    pub fn attached(&self) -> impl Iterator<Item = (OverlayHandle, &HeadlessOverlay)> {
        self.overlays
            .iter()
            .filter(|(_, overlay)| overlay.attached)
            .map(|(handle, overlay)| (*handle, overlay))
    }

    pub fn popup_overlay(&self) -> Option<OverlayHandle> {
        self.open_popup
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Returns and clears the call log.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }
}

impl DisplaySurface for HeadlessSurface {
    type Overlay = OverlayHandle;

    fn create_overlay(&mut self, marker: MarkerSpec) -> OverlayHandle {
        let handle = OverlayHandle(self.next_handle);
        self.next_handle += 1;
        self.overlays.insert(
            handle,
            HeadlessOverlay {
                marker,
                attached: false,
            },
        );
        self.ops.push(SurfaceOp::Create(handle));
        handle
    }

    fn update_overlay(&mut self, overlay: &mut OverlayHandle, marker: MarkerSpec) {
        if let Some(state) = self.overlays.get_mut(overlay) {
            state.marker = marker;
        }
        self.ops.push(SurfaceOp::Update(*overlay));
    }

    fn attach(&mut self, overlay: &OverlayHandle) {
        if let Some(state) = self.overlays.get_mut(overlay) {
            state.attached = true;
        }
        self.ops.push(SurfaceOp::Attach(*overlay));
    }

    fn detach(&mut self, overlay: &OverlayHandle) {
        // Detached overlays are never reattached; the index drops the handle.
        self.overlays.remove(overlay);
        if self.open_popup == Some(*overlay) {
            self.open_popup = None;
        }
        self.ops.push(SurfaceOp::Detach(*overlay));
    }

    fn overlay_position(&self, overlay: &OverlayHandle) -> LatLng {
        self.overlays
            .get(overlay)
            .map(|state| state.marker.position)
            .unwrap_or(self.view.center)
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, animate: bool) {
        self.view = HeadlessView {
            center: bounds.center(),
            zoom: None,
            bounds: Some(bounds),
        };
        self.ops.push(SurfaceOp::FitBounds { bounds, animate });
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) {
        self.view = HeadlessView {
            center,
            zoom: Some(zoom),
            bounds: None,
        };
        self.ops.push(SurfaceOp::FlyTo {
            center,
            zoom,
            duration,
        });
    }

    fn open_popup(&mut self, overlay: &OverlayHandle) {
        if self.overlays.contains_key(overlay) {
            self.open_popup = Some(*overlay);
        }
        self.ops.push(SurfaceOp::OpenPopup(*overlay));
    }
}
