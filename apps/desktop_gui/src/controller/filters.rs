//! Checkbox and select state behind the filter panel.

use atlas_core::ControlSource;
use serde::{Deserialize, Serialize};
use shared::{Category, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControls {
    /// Empty selects every city.
    pub city: String,
    pub statuses: Vec<(Status, bool)>,
    pub categories: Vec<(Category, bool)>,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self {
            city: String::new(),
            statuses: Status::KNOWN.iter().cloned().map(|s| (s, true)).collect(),
            categories: Category::KNOWN.iter().cloned().map(|c| (c, true)).collect(),
        }
    }
}

impl ControlSource for FilterControls {
    fn selected_city(&self) -> String {
        self.city.clone()
    }

    fn checked_statuses(&self) -> Vec<Status> {
        checked(&self.statuses)
    }

    fn checked_categories(&self) -> Vec<Category> {
        checked(&self.categories)
    }
}

fn checked<T: Clone>(boxes: &[(T, bool)]) -> Vec<T> {
    boxes
        .iter()
        .filter(|(_, on)| *on)
        .map(|(value, _)| value.clone())
        .collect()
}

/// Filter selection saved between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedFilters {
    pub city: String,
    pub unchecked_statuses: Vec<Status>,
    pub unchecked_categories: Vec<Category>,
}

impl PersistedFilters {
    pub fn capture(controls: &FilterControls) -> Self {
        Self {
            city: controls.city.clone(),
            unchecked_statuses: unchecked(&controls.statuses),
            unchecked_categories: unchecked(&controls.categories),
        }
    }

    /// Restores onto fresh controls. A saved city no longer in `cities` is
    /// dropped so the map does not open empty.
    pub fn restore(&self, cities: &[&str]) -> FilterControls {
        let mut controls = FilterControls::default();
        if cities.contains(&self.city.as_str()) {
            controls.city = self.city.clone();
        }
        for (status, on) in &mut controls.statuses {
            *on = !self.unchecked_statuses.contains(status);
        }
        for (category, on) in &mut controls.categories {
            *on = !self.unchecked_categories.contains(category);
        }
        controls
    }
}

fn unchecked<T: Clone>(boxes: &[(T, bool)]) -> Vec<T> {
    boxes
        .iter()
        .filter(|(_, on)| !*on)
        .map(|(value, _)| value.clone())
        .collect()
}
