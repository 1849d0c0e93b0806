//! UI events queued from widgets to the render controller.

use atlas_core::{ControlGroup, InputEvent, RenderError};
use shared::ProjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(InputEvent),
    /// Check every status and category box and clear the city.
    ResetFilters,
}

impl UiEvent {
    pub fn filter_changed(group: ControlGroup) -> Self {
        UiEvent::Input(InputEvent::FilterChanged(group))
    }

    pub fn zoom_to(id: ProjectId) -> Self {
        UiEvent::Input(InputEvent::ZoomTo(id))
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Input(InputEvent::FilterChanged(group)) => group.label(),
            UiEvent::Input(InputEvent::ZoomTo(_)) => "zoom_to",
            UiEvent::ResetFilters => "reset_filters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Warning,
    Error,
}

/// One-line message shown under the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub severity: StatusSeverity,
    pub message: String,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn from_render_error(err: &RenderError) -> Self {
        Self {
            severity: StatusSeverity::Error,
            message: format!("Map refresh failed: {err}; restart the viewer"),
        }
    }
}

pub fn visible_summary(visible: usize, total: usize) -> String {
    match (visible, total) {
        (_, 0) => "No projects loaded".to_string(),
        (0, _) => "No projects match the current filters".to_string(),
        (v, t) if v == t => format!("Showing all {t} projects"),
        (v, t) => format!("Showing {v} of {t} projects"),
    }
}
