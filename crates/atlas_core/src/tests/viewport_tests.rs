use super::*;

use shared::{Dataset, LatLng, Status};

use crate::{
    filter::{filter_projects, FilterState},
    headless::{HeadlessSurface, SurfaceOp},
    markers::MarkerSynchronizer,
};

fn displayed(filter: &FilterState) -> (MarkerSynchronizer<HeadlessSurface>, HeadlessSurface) {
    let dataset = Dataset::charleston_demo();
    let mut surface = HeadlessSurface::new(LatLng::new(32.78, -79.94), 12.0);
    let mut sync = MarkerSynchronizer::new();
    sync.reconcile(&filter_projects(&dataset, filter), &mut surface);
    surface.take_ops();
    (sync, surface)
}

#[test]
fn fit_pads_marker_bounds_and_frames_without_animation() {
    let (sync, mut surface) = displayed(&FilterState::select_all().with_status([Status::Active]));
    let controller = ViewportController::default();

    let framed = controller
        .fit_to_visible(sync.index(), &mut surface)
        .expect("markers displayed");

    // Active projects: CHS-001, CHS-004, CHS-005.
    let raw = LatLngBounds::from_points([
        LatLng::new(32.7749, -79.9496),
        LatLng::new(32.7905, -79.9585),
        LatLng::new(32.8986, -80.0405),
    ])
    .expect("bounds");
    assert_eq!(framed, raw.pad(0.2));
    assert!(framed.lat_span() > raw.lat_span());
    assert_eq!(
        surface.ops(),
        [SurfaceOp::FitBounds {
            bounds: framed,
            animate: false,
        }]
    );
}

#[test]
fn fit_is_a_no_op_when_nothing_is_displayed() {
    let (sync, mut surface) = displayed(&FilterState::select_all().with_status(Vec::<Status>::new()));
    let before = surface.view();

    assert!(ViewportController::default()
        .fit_to_visible(sync.index(), &mut surface)
        .is_none());
    assert_eq!(surface.view(), before);
    assert!(surface.ops().is_empty());
}

#[test]
fn zoom_to_flies_to_marker_and_opens_popup() {
    let (sync, mut surface) = displayed(&FilterState::select_all());
    let controller = ViewportController::default();
    let id = ProjectId::new("CHS-004");

    assert!(controller.zoom_to(&id, sync.index(), &mut surface));

    let handle = *sync.index().get(&id).expect("displayed");
    assert_eq!(
        surface.ops(),
        [
            SurfaceOp::FlyTo {
                center: LatLng::new(32.7905, -79.9585),
                zoom: DEFAULT_FLY_TO_ZOOM,
                duration: DEFAULT_FLY_TO_DURATION,
            },
            SurfaceOp::OpenPopup(handle),
        ]
    );
    assert_eq!(surface.popup_overlay(), Some(handle));
}

#[test]
fn zoom_to_hidden_project_does_nothing() {
    let (sync, mut surface) = displayed(&FilterState::select_all().with_status([Status::Active]));
    let before = surface.view();

    assert!(!ViewportController::default().zoom_to(
        &ProjectId::new("CHS-002"),
        sync.index(),
        &mut surface
    ));
    assert!(surface.ops().is_empty());
    assert_eq!(surface.view(), before);
}
