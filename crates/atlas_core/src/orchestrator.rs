//! Render orchestration: one synchronous pass per control change.

use shared::{Dataset, LatLngBounds, ProjectId};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    filter::{filter_projects, FilterState},
    listing::render_list,
    markers::{MarkerIndex, MarkerSynchronizer, ReconcileStats},
    surface::{ControlGroup, ControlSource, DisplaySurface, InputEvent, ListSurface},
    viewport::ViewportController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Rendering,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A previous pass never returned to idle, e.g. a surface call panicked.
    #[error("a render pass is already in progress")]
    PassInProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub filter: FilterState,
    pub visible: usize,
    pub markers: ReconcileStats,
    pub framed: Option<LatLngBounds>,
}

/// Owns the dataset and the marker synchronizer; drives filter, markers,
/// list, and viewport in that order.
pub struct RenderOrchestrator<S: DisplaySurface> {
    dataset: Dataset,
    markers: MarkerSynchronizer<S>,
    viewport: ViewportController,
    phase: RenderPhase,
    subscriptions: Vec<ControlGroup>,
    passes: u64,
}

impl<S: DisplaySurface> RenderOrchestrator<S> {
    pub fn new(dataset: Dataset, viewport: ViewportController) -> Self {
        Self {
            dataset,
            markers: MarkerSynchronizer::new(),
            viewport,
            phase: RenderPhase::Idle,
            subscriptions: ControlGroup::ALL.to_vec(),
            passes: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn markers(&self) -> &MarkerIndex<S::Overlay> {
        self.markers.index()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn is_subscribed(&self, group: ControlGroup) -> bool {
        self.subscriptions.contains(&group)
    }

    /// Initial render establishing the first view.
    pub fn start<C, L>(
        &mut self,
        controls: &C,
        surface: &mut S,
        list: &mut L,
    ) -> Result<RenderSummary, RenderError>
    where
        C: ControlSource + ?Sized,
        L: ListSurface + ?Sized,
    {
        info!(projects = self.dataset.len(), "initial render");
        self.render(controls, surface, list)
    }

    /// Routes a control notification. Filter changes from subscribed groups
    /// trigger a full pass; `ZoomTo` only moves the viewport.
    pub fn handle_event<C, L>(
        &mut self,
        event: &InputEvent,
        controls: &C,
        surface: &mut S,
        list: &mut L,
    ) -> Result<Option<RenderSummary>, RenderError>
    where
        C: ControlSource + ?Sized,
        L: ListSurface + ?Sized,
    {
        match event {
            InputEvent::FilterChanged(group) if self.is_subscribed(*group) => {
                debug!(group = group.label(), "filter control changed");
                self.render(controls, surface, list).map(Some)
            }
            InputEvent::FilterChanged(_) => Ok(None),
            InputEvent::ZoomTo(id) => {
                self.zoom_to(id, surface);
                Ok(None)
            }
        }
    }

    /// One complete pass: read controls, filter, reconcile markers, replace
    /// the list, refit the viewport.
    pub fn render<C, L>(
        &mut self,
        controls: &C,
        surface: &mut S,
        list: &mut L,
    ) -> Result<RenderSummary, RenderError>
    where
        C: ControlSource + ?Sized,
        L: ListSurface + ?Sized,
    {
        if self.phase == RenderPhase::Rendering {
            return Err(RenderError::PassInProgress);
        }
        self.phase = RenderPhase::Rendering;

        let filter = controls.read_filter_state();
        let visible = filter_projects(&self.dataset, &filter);
        let markers = self.markers.reconcile(&visible, surface);
        list.replace_list(render_list(&visible));
        let framed = self.viewport.fit_to_visible(self.markers.index(), surface);

        self.passes += 1;
        self.phase = RenderPhase::Idle;

        debug!(
            pass = self.passes,
            visible = visible.len(),
            added = markers.added,
            updated = markers.updated,
            removed = markers.removed,
            "render pass complete"
        );

        Ok(RenderSummary {
            visible: visible.len(),
            filter,
            markers,
            framed,
        })
    }

    pub fn zoom_to(&self, id: &ProjectId, surface: &mut S) -> bool {
        self.viewport.zoom_to(id, self.markers.index(), surface)
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
