//! Marker synchronization: keeps one overlay per visible project.

use std::collections::{HashMap, HashSet};

use shared::{Project, ProjectId};
use tracing::trace;

use crate::surface::{DisplaySurface, MarkerSpec};

/// Project id to displayed overlay. After every reconcile the key set is
/// exactly the id set of the projects passed in.
#[derive(Debug)]
pub struct MarkerIndex<O> {
    entries: HashMap<ProjectId, O>,
}

impl<O> Default for MarkerIndex<O> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<O> MarkerIndex<O> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &ProjectId) -> Option<&O> {
        self.entries.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProjectId> {
        self.entries.keys()
    }

    pub fn overlays(&self) -> impl Iterator<Item = &O> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectId, &O)> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Sole owner of the [`MarkerIndex`].
pub struct MarkerSynchronizer<S: DisplaySurface> {
    index: MarkerIndex<S::Overlay>,
}

impl<S: DisplaySurface> Default for MarkerSynchronizer<S> {
    fn default() -> Self {
        Self {
            index: MarkerIndex::default(),
        }
    }
}

impl<S: DisplaySurface> MarkerSynchronizer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &MarkerIndex<S::Overlay> {
        &self.index
    }

    /// Brings the displayed overlays into exact correspondence with
    /// `visible`. Overlays for projects that stay visible are refreshed in
    /// place, never recreated.
    pub fn reconcile(&mut self, visible: &[&Project], surface: &mut S) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        let mut keep = HashSet::with_capacity(visible.len());

        for project in visible {
            let marker = MarkerSpec::for_project(project);
            match self.index.entries.get_mut(&project.id) {
                Some(overlay) => {
                    surface.update_overlay(overlay, marker);
                    stats.updated += 1;
                }
                None => {
                    let overlay = surface.create_overlay(marker);
                    surface.attach(&overlay);
                    trace!(project_id = %project.id, "marker added");
                    self.index.entries.insert(project.id.clone(), overlay);
                    stats.added += 1;
                }
            }
            keep.insert(&project.id);
        }

        let stale: Vec<ProjectId> = self
            .index
            .entries
            .keys()
            .filter(|id| !keep.contains(id))
            .cloned()
            .collect();
        for id in stale {
            if let Some(overlay) = self.index.entries.remove(&id) {
                surface.detach(&overlay);
                trace!(project_id = %id, "marker removed");
                stats.removed += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
#[path = "tests/markers_tests.rs"]
mod tests;
