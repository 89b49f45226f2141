use super::*;
use crate::foundation::core::Viewport;
use crate::platform::HeadlessPlatform;

fn platform() -> HeadlessPlatform {
    HeadlessPlatform::new(Viewport::new(1280.0, 720.0).unwrap(), 5000.0)
}

#[test]
fn scrolls_to_top_minus_offset() {
    let mut p = platform();
    let req = smooth_scroll_to(&mut p, 1200.0, 80.0, false);
    assert_eq!(req.top, 1120.0);
    assert_eq!(req.behavior, ScrollBehavior::Smooth);
    assert_eq!(p.scroll_log, vec![req]);
}

#[test]
fn never_requests_negative_offsets() {
    let mut p = platform();
    assert_eq!(smooth_scroll_to(&mut p, 20.0, 80.0, false).top, 0.0);
}

#[test]
fn reduced_motion_jumps_instead() {
    let mut p = platform();
    assert_eq!(
        smooth_scroll_to(&mut p, 100.0, 0.0, true).behavior,
        ScrollBehavior::Instant
    );
}

#[test]
fn page_progress_bounds() {
    assert_eq!(page_progress(0.0, 2000.0, 1000.0), 0.0);
    assert_eq!(page_progress(500.0, 2000.0, 1000.0), 0.5);
    assert_eq!(page_progress(5000.0, 2000.0, 1000.0), 1.0);
    assert_eq!(page_progress(0.0, 800.0, 1000.0), 1.0);
}

#[test]
fn back_to_top_threshold_and_action() {
    let btt = BackToTop::default();
    assert!(!btt.is_visible(400.0));
    assert!(btt.is_visible(401.0));

    let mut p = platform();
    p.set_scroll_y(300.0);
    assert_eq!(btt.activate(&mut p, false), None);
    assert!(p.scroll_log.is_empty());

    p.set_scroll_y(3000.0);
    let req = btt.activate(&mut p, false).unwrap();
    assert_eq!(req.behavior, ScrollBehavior::Smooth);
    assert_eq!(p.scroll_y, 0.0);
}
