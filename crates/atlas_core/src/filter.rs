//! Filter evaluation over city, status, and category selections.

use std::collections::BTreeSet;

use shared::{Category, Project, Status};

/// Combined control selection for one render pass.
///
/// An empty `city` places no constraint. An empty status or category set
/// hides everything rather than showing everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub city: String,
    pub status: BTreeSet<Status>,
    pub category: BTreeSet<Category>,
}

impl FilterState {
    pub fn new(
        city: impl Into<String>,
        status: impl IntoIterator<Item = Status>,
        category: impl IntoIterator<Item = Category>,
    ) -> Self {
        Self {
            city: city.into(),
            status: status.into_iter().collect(),
            category: category.into_iter().collect(),
        }
    }

    /// Every known status and category checked, any city.
    pub fn select_all() -> Self {
        Self::new(
            String::new(),
            Status::KNOWN.iter().cloned(),
            Category::KNOWN.iter().cloned(),
        )
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_status(mut self, status: impl IntoIterator<Item = Status>) -> Self {
        self.status = status.into_iter().collect();
        self
    }

    pub fn with_category(mut self, category: impl IntoIterator<Item = Category>) -> Self {
        self.category = category.into_iter().collect();
        self
    }
}

/// City matching is exact and case-sensitive; "Charleston, SC" and
/// "Charleston SC" are different cities. Category and status text is also
/// compared as loaded, with no trimming or case folding.
pub fn passes(project: &Project, filter: &FilterState) -> bool {
    let city_ok = filter.city.is_empty() || project.city == filter.city;
    let status_ok = filter.status.contains(&project.status);
    let category_ok = filter.category.contains(&project.category);
    city_ok && status_ok && category_ok
}

/// Passing projects in their original order.
pub fn filter_projects<'a, I>(projects: I, filter: &FilterState) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter(|project| passes(project, filter))
        .collect()
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
