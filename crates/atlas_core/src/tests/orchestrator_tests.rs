use super::*;

use std::{
    cell::RefCell,
    panic::{catch_unwind, AssertUnwindSafe},
    rc::Rc,
    time::Duration,
};

use shared::{Category, LatLng, Status};

use crate::{
    headless::{HeadlessSurface, OverlayHandle, SurfaceOp},
    listing::ProjectCard,
    surface::MarkerSpec,
};

fn orchestrator() -> RenderOrchestrator<HeadlessSurface> {
    RenderOrchestrator::new(Dataset::charleston_demo(), ViewportController::default())
}

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(LatLng::new(32.78, -79.94), 12.0)
}

fn card_ids(cards: &[ProjectCard]) -> Vec<&str> {
    cards.iter().map(|card| card.id.as_str()).collect()
}

#[test]
fn all_selected_shows_every_project_in_order() {
    let mut orch = orchestrator();
    let mut surface = surface();
    let mut list: Vec<ProjectCard> = Vec::new();

    let summary = orch
        .start(&FilterState::select_all(), &mut surface, &mut list)
        .expect("render");

    assert_eq!(summary.visible, 6);
    assert_eq!(summary.markers.added, 6);
    assert_eq!(orch.markers().len(), 6);
    assert_eq!(
        card_ids(&list),
        ["CHS-001", "CHS-002", "CHS-003", "CHS-004", "CHS-005", "CHS-006"]
    );
    assert!(summary.framed.is_some());
    assert_eq!(orch.phase(), RenderPhase::Idle);
}

#[test]
fn narrowing_to_active_removes_planned_projects() {
    let mut orch = orchestrator();
    let mut surface = surface();
    let mut list: Vec<ProjectCard> = Vec::new();
    orch.start(&FilterState::select_all(), &mut surface, &mut list)
        .expect("initial");

    let active = FilterState::new(
        "",
        [Status::Active],
        Category::KNOWN.iter().cloned(),
    );
    let summary = orch
        .handle_event(
            &InputEvent::FilterChanged(ControlGroup::Status),
            &active,
            &mut surface,
            &mut list,
        )
        .expect("render")
        .expect("status group is subscribed");

    assert_eq!(summary.visible, 3);
    assert_eq!(summary.markers.removed, 3);
    assert_eq!(card_ids(&list), ["CHS-001", "CHS-004", "CHS-005"]);
    let mut displayed: Vec<_> = orch.markers().ids().map(|id| id.as_str()).collect();
    displayed.sort_unstable();
    assert_eq!(displayed, ["CHS-001", "CHS-004", "CHS-005"]);
    assert_eq!(orch.passes(), 2);
}

/// Surface and list sharing one journal, so the relative order of marker,
/// list, and viewport steps within a pass is visible.
struct Journaled<T> {
    inner: T,
    journal: Rc<RefCell<Vec<&'static str>>>,
}

impl<T> Journaled<T> {
    fn note(&self, step: &'static str) {
        self.journal.borrow_mut().push(step);
    }
}

impl DisplaySurface for Journaled<HeadlessSurface> {
    type Overlay = OverlayHandle;

    fn create_overlay(&mut self, marker: MarkerSpec) -> OverlayHandle {
        self.note("create");
        self.inner.create_overlay(marker)
    }

    fn update_overlay(&mut self, overlay: &mut OverlayHandle, marker: MarkerSpec) {
        self.note("update");
        self.inner.update_overlay(overlay, marker);
    }

    fn attach(&mut self, overlay: &OverlayHandle) {
        self.note("attach");
        self.inner.attach(overlay);
    }

    fn detach(&mut self, overlay: &OverlayHandle) {
        self.note("detach");
        self.inner.detach(overlay);
    }

    fn overlay_position(&self, overlay: &OverlayHandle) -> LatLng {
        self.inner.overlay_position(overlay)
    }

    fn fit_bounds(&mut self, bounds: shared::LatLngBounds, animate: bool) {
        self.note("fit_bounds");
        self.inner.fit_bounds(bounds, animate);
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) {
        self.note("fly_to");
        self.inner.fly_to(center, zoom, duration);
    }

    fn open_popup(&mut self, overlay: &OverlayHandle) {
        self.note("open_popup");
        self.inner.open_popup(overlay);
    }
}

impl ListSurface for Journaled<Vec<ProjectCard>> {
    fn replace_list(&mut self, cards: Vec<ProjectCard>) {
        self.note("list");
        self.inner = cards;
    }
}

#[test]
fn pass_runs_markers_then_list_then_viewport() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let mut orch: RenderOrchestrator<Journaled<HeadlessSurface>> =
        RenderOrchestrator::new(Dataset::charleston_demo(), ViewportController::default());
    let mut surface = Journaled {
        inner: surface(),
        journal: Rc::clone(&journal),
    };
    let mut list = Journaled {
        inner: Vec::<ProjectCard>::new(),
        journal: Rc::clone(&journal),
    };

    orch.start(&FilterState::select_all(), &mut surface, &mut list)
        .expect("initial");
    journal.borrow_mut().clear();

    let active = FilterState::select_all().with_status([Status::Active]);
    orch.render(&active, &mut surface, &mut list).expect("render");

    let steps = journal.borrow().clone();
    let list_at = steps.iter().position(|step| *step == "list").expect("list replaced");
    let fit_at = steps.iter().position(|step| *step == "fit_bounds").expect("viewport fitted");
    assert!(steps[..list_at].contains(&"detach"), "steps: {steps:?}");
    assert!(steps[..list_at].contains(&"update"), "steps: {steps:?}");
    assert!(
        steps[..list_at]
            .iter()
            .all(|step| matches!(*step, "create" | "attach" | "update" | "detach")),
        "steps: {steps:?}"
    );
    assert_eq!(fit_at, list_at + 1, "steps: {steps:?}");
    assert_eq!(fit_at, steps.len() - 1, "steps: {steps:?}");
    assert_eq!(steps.iter().filter(|step| **step == "list").count(), 1);
    assert!(list.inner.iter().all(|card| card.status == "active"));
}

#[test]
fn empty_result_clears_list_and_keeps_viewport() {
    let mut orch = orchestrator();
    let mut surface = surface();
    let mut list: Vec<ProjectCard> = Vec::new();
    orch.start(&FilterState::select_all(), &mut surface, &mut list)
        .expect("initial");
    let view = surface.view();

    let none = FilterState::select_all().with_city("Mount Pleasant, SC");
    let summary = orch.render(&none, &mut surface, &mut list).expect("render");

    assert_eq!(summary.visible, 0);
    assert!(summary.framed.is_none());
    assert!(list.is_empty());
    assert!(orch.markers().is_empty());
    assert_eq!(surface.view(), view);
}

#[test]
fn zoom_event_moves_viewport_without_rendering() {
    let mut orch = orchestrator();
    let mut surface = surface();
    let mut list: Vec<ProjectCard> = Vec::new();
    orch.start(&FilterState::select_all(), &mut surface, &mut list)
        .expect("initial");
    surface.take_ops();

    let outcome = orch
        .handle_event(
            &InputEvent::ZoomTo(ProjectId::new("CHS-003")),
            &FilterState::default(),
            &mut surface,
            &mut list,
        )
        .expect("zoom");

    assert!(outcome.is_none());
    assert_eq!(orch.passes(), 1);
    assert_eq!(list.len(), 6);
    assert!(matches!(surface.ops()[0], SurfaceOp::FlyTo { zoom, .. } if zoom == 15.0));
    assert!(!orch.zoom_to(&ProjectId::new("NOPE"), &mut surface));
}

struct FailingSurface {
    inner: HeadlessSurface,
    fail_on_fit: bool,
}

impl DisplaySurface for FailingSurface {
    type Overlay = OverlayHandle;

    fn create_overlay(&mut self, marker: MarkerSpec) -> OverlayHandle {
        self.inner.create_overlay(marker)
    }

    fn update_overlay(&mut self, overlay: &mut OverlayHandle, marker: MarkerSpec) {
        self.inner.update_overlay(overlay, marker)
    }

    fn attach(&mut self, overlay: &OverlayHandle) {
        self.inner.attach(overlay)
    }

    fn detach(&mut self, overlay: &OverlayHandle) {
        self.inner.detach(overlay)
    }

    fn overlay_position(&self, overlay: &OverlayHandle) -> LatLng {
        self.inner.overlay_position(overlay)
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, animate: bool) {
        if self.fail_on_fit {
            panic!("map widget went away");
        }
        self.inner.fit_bounds(bounds, animate)
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) {
        self.inner.fly_to(center, zoom, duration)
    }

    fn open_popup(&mut self, overlay: &OverlayHandle) {
        self.inner.open_popup(overlay)
    }
}

#[test]
fn interrupted_pass_blocks_further_renders() {
    let mut orch: RenderOrchestrator<FailingSurface> =
        RenderOrchestrator::new(Dataset::charleston_demo(), ViewportController::default());
    let mut surface = FailingSurface {
        inner: surface(),
        fail_on_fit: true,
    };
    let mut list: Vec<ProjectCard> = Vec::new();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        orch.render(&FilterState::select_all(), &mut surface, &mut list)
    }));
    assert!(outcome.is_err());
    assert_eq!(orch.phase(), RenderPhase::Rendering);

    surface.fail_on_fit = false;
    assert_eq!(
        orch.render(&FilterState::select_all(), &mut surface, &mut list),
        Err(RenderError::PassInProgress)
    );
}

#[test]
fn subscribes_to_every_control_group() {
    let orch = orchestrator();
    for group in ControlGroup::ALL {
        assert!(orch.is_subscribed(group));
    }
}
