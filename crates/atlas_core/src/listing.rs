//! Side-list rendering. Stateless: every pass rebuilds the full list.

use serde::Serialize;
use shared::{Project, ProjectId};

use crate::present::{budget_label, date_range_label};

/// One entry in the project list. `id` drives the "zoom to" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: ProjectId,
    pub name: String,
    pub category: String,
    pub status: String,
    pub city: String,
    pub dates: String,
    pub budget: String,
    pub links: Vec<String>,
}

impl ProjectCard {
    pub fn for_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            category: project.category.to_string(),
            status: project.status.to_string(),
            city: project.city.clone(),
            dates: date_range_label(project),
            budget: budget_label(project),
            links: project.links.clone(),
        }
    }
}

/// Cards in input order; no sorting.
pub fn render_list(projects: &[&Project]) -> Vec<ProjectCard> {
    projects
        .iter()
        .map(|project| ProjectCard::for_project(project))
        .collect()
}
