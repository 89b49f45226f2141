use super::*;

fn sections() -> Vec<(&'static str, f64)> {
    vec![("a", 0.0), ("b", 500.0), ("c", 1000.0)]
}

#[test]
fn picks_last_section_at_or_above_probe() {
    assert_eq!(active_section(sections().into_iter(), 600.0, 0.0), Some("b"));
    assert_eq!(active_section(sections().into_iter(), 0.0, 0.0), Some("a"));
    assert_eq!(active_section(sections().into_iter(), 1000.0, 0.0), Some("c"));
    assert_eq!(active_section(sections().into_iter(), 450.0, 50.0), Some("b"));
}

#[test]
fn nothing_active_above_first_section() {
    let s = vec![("hero", 100.0), ("about", 900.0)];
    assert_eq!(active_section(s.into_iter(), 0.0, 0.0), None);
}

#[test]
fn spy_reports_transitions_only() {
    let mut spy = ScrollSpy::new(vec!["a".into(), "b".into(), "c".into()], 0.0);
    let tops = |id: &str| sections().into_iter().find(|(s, _)| *s == id).map(|(_, t)| t);

    assert_eq!(spy.update(0.0, tops), Some(Some("a".to_owned())));
    assert_eq!(spy.update(100.0, tops), None);
    assert_eq!(spy.update(600.0, tops), Some(Some("b".to_owned())));
    assert_eq!(spy.state().active_section_id.as_deref(), Some("b"));
}

#[test]
fn unresolved_sections_are_skipped() {
    let mut spy = ScrollSpy::new(vec!["a".into(), "ghost".into()], 0.0);
    let tops = |id: &str| (id == "a").then_some(0.0);
    assert_eq!(spy.update(5000.0, tops), Some(Some("a".to_owned())));
}

#[test]
fn spy_goes_inactive_above_all_sections() {
    let mut spy = ScrollSpy::new(vec!["x".into()], 0.0);
    assert_eq!(spy.update(500.0, |_| Some(200.0)), Some(Some("x".to_owned())));
    assert_eq!(spy.update(100.0, |_| Some(200.0)), Some(None));
}

#[test]
fn sections_can_be_added_and_removed() {
    let mut spy = ScrollSpy::new(Vec::new(), 0.0);
    spy.add_section("a");
    spy.add_section("a");
    spy.add_section("b");
    assert_eq!(spy.section_ids(), ["a".to_owned(), "b".to_owned()]);

    spy.update(10.0, |_| Some(0.0));
    assert_eq!(spy.state().active_section_id.as_deref(), Some("b"));
    spy.remove_section("b");
    assert_eq!(spy.state().active_section_id, None);
    assert_eq!(spy.section_ids(), ["a".to_owned()]);
}
