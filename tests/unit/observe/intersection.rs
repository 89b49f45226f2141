use super::*;

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

#[test]
fn ratio_of_partially_visible_box() {
    let r = Rect::new(0.0, 500.0, 100.0, 700.0);
    assert_eq!(intersection_ratio(r, viewport()), 0.5);
    assert_eq!(
        intersection_ratio(Rect::new(0.0, 700.0, 100.0, 800.0), viewport()),
        0.0
    );
}

#[test]
fn zero_area_targets_are_all_or_nothing() {
    assert_eq!(
        intersection_ratio(Rect::new(10.0, 10.0, 10.0, 10.0), viewport()),
        1.0
    );
    assert_eq!(
        intersection_ratio(Rect::new(10.0, 900.0, 10.0, 900.0), viewport()),
        0.0
    );
    // A vertical line straddling the bottom edge touches the root but is not inside it.
    assert_eq!(
        intersection_ratio(Rect::new(10.0, 550.0, 10.0, 650.0), viewport()),
        0.0
    );
}

#[test]
fn zero_threshold_needs_overlap() {
    let t0 = Threshold::new(0.0).unwrap();
    assert!(!crosses(0.0, t0));
    assert!(crosses(0.01, t0));
    let half = Threshold::new(0.5).unwrap();
    assert!(crosses(0.5, half));
    assert!(!crosses(0.49, half));
}

#[test]
fn entries_only_on_state_change() {
    let mut reg = ObserverRegistry::new();
    let id = reg.observe(ElementId(1), ObserverOptions::default());
    let mut rect = Rect::new(0.0, 900.0, 100.0, 1000.0);

    let first = reg.check(viewport(), |_| Some(rect));
    assert_eq!(first.len(), 1);
    assert!(!first[0].is_intersecting);
    assert!(reg.check(viewport(), |_| Some(rect)).is_empty());

    rect = Rect::new(0.0, 100.0, 100.0, 200.0);
    let entered = reg.check(viewport(), |_| Some(rect));
    assert_eq!(entered.len(), 1);
    assert_eq!(entered[0].observer, id);
    assert!(entered[0].is_intersecting);
    assert_eq!(entered[0].ratio, 1.0);
}

#[test]
fn root_margin_shrinks_trigger_zone() {
    let mut reg = ObserverRegistry::new();
    reg.observe(
        ElementId(1),
        ObserverOptions {
            threshold: Threshold::new(0.0).unwrap(),
            root_margin: RootMargin::parse("0px 0px -50px 0px").unwrap(),
        },
    );
    // Sits in the bottom 50px of the viewport: visible, but outside the shrunk root.
    let rect = Rect::new(0.0, 560.0, 100.0, 600.0);
    let entries = reg.check(viewport(), |_| Some(rect));
    assert!(!entries[0].is_intersecting);
}

#[test]
fn disconnect_releases_observation() {
    let mut reg = ObserverRegistry::new();
    let a = reg.observe(ElementId(1), ObserverOptions::default());
    reg.observe(ElementId(2), ObserverOptions::default());
    assert_eq!(reg.live_count(), 2);
    assert!(reg.disconnect(a));
    assert!(!reg.disconnect(a));
    assert!(!reg.is_live(a));
    assert_eq!(reg.live_count(), 1);
    assert_eq!(reg.created_count(), 2);
}

#[test]
fn elements_without_geometry_are_skipped() {
    let mut reg = ObserverRegistry::new();
    reg.observe(ElementId(1), ObserverOptions::default());
    assert!(reg.check(viewport(), |_| None).is_empty());
}
