//! Seams to the external collaborators: the map widget, the filter controls,
//! and the list panel.

use std::time::Duration;

use shared::{Category, LatLng, LatLngBounds, Project, ProjectId, Status};

use crate::{filter::FilterState, listing::ProjectCard, present::PopupContent, style::MarkerStyle};

/// Everything a map overlay shows for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: PopupContent,
}

impl MarkerSpec {
    pub fn for_project(project: &Project) -> Self {
        Self {
            position: project.position,
            style: MarkerStyle::for_category(&project.category),
            popup: PopupContent::for_project(project),
        }
    }
}

/// Map widget operations. `Overlay` is whatever handle the widget uses to
/// address one marker; its identity is preserved across updates.
pub trait DisplaySurface {
    type Overlay;

    fn create_overlay(&mut self, marker: MarkerSpec) -> Self::Overlay;
    fn update_overlay(&mut self, overlay: &mut Self::Overlay, marker: MarkerSpec);
    fn attach(&mut self, overlay: &Self::Overlay);
    fn detach(&mut self, overlay: &Self::Overlay);
    fn overlay_position(&self, overlay: &Self::Overlay) -> LatLng;
    fn fit_bounds(&mut self, bounds: LatLngBounds, animate: bool);
    fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration);
    fn open_popup(&mut self, overlay: &Self::Overlay);
}

/// Current state of the filter controls.
pub trait ControlSource {
    /// Selected city, empty for "all cities".
    fn selected_city(&self) -> String;
    fn checked_statuses(&self) -> Vec<Status>;
    fn checked_categories(&self) -> Vec<Category>;

    fn read_filter_state(&self) -> FilterState {
        FilterState::new(
            self.selected_city(),
            self.checked_statuses(),
            self.checked_categories(),
        )
    }
}

impl ControlSource for FilterState {
    fn selected_city(&self) -> String {
        self.city.clone()
    }

    fn checked_statuses(&self) -> Vec<Status> {
        self.status.iter().cloned().collect()
    }

    fn checked_categories(&self) -> Vec<Category> {
        self.category.iter().cloned().collect()
    }

    fn read_filter_state(&self) -> FilterState {
        self.clone()
    }
}

/// Receives the full replacement list after every render pass.
pub trait ListSurface {
    fn replace_list(&mut self, cards: Vec<ProjectCard>);
}

impl ListSurface for Vec<ProjectCard> {
    fn replace_list(&mut self, cards: Vec<ProjectCard>) {
        *self = cards;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlGroup {
    City,
    Status,
    Category,
}

impl ControlGroup {
    pub const ALL: [ControlGroup; 3] = [ControlGroup::City, ControlGroup::Status, ControlGroup::Category];

    pub fn label(self) -> &'static str {
        match self {
            ControlGroup::City => "city",
            ControlGroup::Status => "status",
            ControlGroup::Category => "category",
        }
    }
}

/// Notifications the host forwards from its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    FilterChanged(ControlGroup),
    ZoomTo(ProjectId),
}
