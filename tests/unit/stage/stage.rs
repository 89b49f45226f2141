use super::*;
use crate::animation::style::AnimationName;
use crate::foundation::core::Viewport;
use crate::platform::{HeadlessPlatform, ScrollBehavior};

fn platform() -> HeadlessPlatform {
    HeadlessPlatform::new(Viewport::new(1000.0, 800.0).unwrap(), 5000.0)
}

fn stage() -> Stage<HeadlessPlatform> {
    Stage::new(platform(), MotionConfig::default())
}

fn band(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 1000.0, top + height)
}

fn scroll(stage: &mut Stage<HeadlessPlatform>, y: f64) {
    stage.platform_mut().set_scroll_y(y);
    stage.on_scroll();
}

fn visibility_flips(updates: &[StageUpdate]) -> Vec<(ElementId, bool)> {
    updates
        .iter()
        .filter_map(|u| match u {
            StageUpdate::Visibility {
                element, visible, ..
            } => Some((*element, *visible)),
            _ => None,
        })
        .collect()
}

#[test]
fn reveal_fires_when_scrolled_into_view() {
    let mut s = stage();
    let el = s.mount_default_reveal();
    s.set_layout(el, band(1200.0, 100.0)).unwrap();

    assert!(visibility_flips(&s.tick(Millis(0))).is_empty());
    assert_eq!(s.reveal_state(el), Some(AnimationState::default()));

    scroll(&mut s, 600.0);
    assert_eq!(visibility_flips(&s.tick(Millis(16))), vec![(el, true)]);
    assert_eq!(s.stats().live_observers, 0);

    scroll(&mut s, 0.0);
    assert!(visibility_flips(&s.tick(Millis(32))).is_empty());
    assert!(s.reveal_state(el).unwrap().visible);
}

#[test]
fn reduced_motion_reveals_everything_without_observers() {
    let mut s = Stage::new(platform().with_reduced_motion(true), MotionConfig::default());
    let ids: Vec<ElementId> = (0..3).map(|_| s.mount_default_reveal()).collect();
    assert_eq!(s.observers_created(), 0);
    for id in &ids {
        assert!(s.reveal_state(*id).unwrap().visible);
    }
    let flips = visibility_flips(&s.tick(Millis(0)));
    assert_eq!(flips, ids.iter().map(|id| (*id, true)).collect::<Vec<_>>());
}

#[test]
fn config_override_beats_platform_preference() {
    let cfg = MotionConfig {
        reduced_motion: Some(true),
        ..MotionConfig::default()
    };
    let mut s = Stage::new(platform(), cfg);
    let el = s.mount_default_reveal();
    assert!(s.reveal_state(el).unwrap().visible);
    assert_eq!(s.stats().live_observers, 0);
}

#[test]
fn config_override_makes_programmatic_scrolls_instant() {
    let cfg = MotionConfig {
        reduced_motion: Some(true),
        spy_offset: 0.0,
        ..MotionConfig::default()
    };
    let mut s = Stage::new(platform(), cfg);
    let a = s.mount_section("a").unwrap();
    s.set_layout(a, band(1200.0, 400.0)).unwrap();
    let req = s.scroll_to_section("a").unwrap();
    assert_eq!(req.behavior, ScrollBehavior::Instant);

    s.platform_mut().set_scroll_y(2000.0);
    let req = s.scroll_to_top().unwrap();
    assert_eq!(req.behavior, ScrollBehavior::Instant);
    assert_eq!(s.platform().scroll_y, 0.0);
}

#[test]
fn back_to_top_is_inert_while_hidden() {
    let mut s = stage();
    s.platform_mut().set_scroll_y(100.0);
    assert_eq!(s.scroll_to_top(), None);
    assert!(s.platform().scroll_log.is_empty());

    s.platform_mut().set_scroll_y(1500.0);
    let req = s.scroll_to_top().unwrap();
    assert_eq!((req.top, req.behavior), (0.0, ScrollBehavior::Smooth));
}

#[test]
fn unmount_drops_reveal_queued_at_mount() {
    let mut s = Stage::new(platform().with_reduced_motion(true), MotionConfig::default());
    let gone = s.mount_default_reveal();
    let kept = s.mount_default_reveal();
    assert!(s.unmount(gone));
    assert_eq!(visibility_flips(&s.tick(Millis(0))), vec![(kept, true)]);

    let last = s.mount_default_reveal();
    assert!(s.unmount(last));
    assert!(visibility_flips(&s.tick(Millis(16))).is_empty());
}

#[test]
fn staggered_children_reveal_in_input_order() {
    let mut s = stage();
    let plan = StaggerPlan::stagger(vec!["a", "b", "c"], RevealConfig::default(), Millis(150));
    let mounted = s.mount_stagger(plan);
    for (_, id) in &mounted {
        s.set_layout(*id, band(100.0, 50.0)).unwrap();
    }
    let delays: Vec<u64> = mounted
        .iter()
        .map(|(_, id)| s.reveal_delay(*id).unwrap().0)
        .collect();
    assert_eq!(delays, vec![0, 150, 300]);

    let ids: Vec<ElementId> = mounted.iter().map(|(_, id)| *id).collect();
    assert_eq!(visibility_flips(&s.tick(Millis(0))), vec![(ids[0], true)]);
    assert_eq!(s.next_deadline(), Some(Millis(150)));
    assert!(visibility_flips(&s.tick(Millis(100))).is_empty());
    assert_eq!(visibility_flips(&s.tick(Millis(150))), vec![(ids[1], true)]);
    assert_eq!(visibility_flips(&s.tick(Millis(300))), vec![(ids[2], true)]);
    assert_eq!(s.stats().pending_timers, 0);
}

#[test]
fn unmount_mid_delay_leaves_nothing_behind() {
    let mut s = stage();
    let plan = StaggerPlan::stagger(vec![(), (), ()], RevealConfig::default(), Millis(500));
    let mounted = s.mount_stagger(plan);
    for (_, id) in &mounted {
        s.set_layout(*id, band(100.0, 50.0)).unwrap();
    }
    s.tick(Millis(0));
    assert_eq!(s.stats().pending_timers, 2);
    assert_eq!(s.stats().live_observers, 2);

    s.unmount_all();
    assert_eq!(
        s.stats(),
        StageStats {
            mounted: 0,
            live_observers: 0,
            pending_timers: 0,
            frames_run: 1,
        }
    );
    assert!(s.tick(Millis(10_000)).is_empty());
}

#[test]
fn repeatable_reveal_hides_when_leaving() {
    let mut s = stage();
    let cfg = RevealConfig {
        trigger_once: false,
        animation: AnimationName::Scale,
        ..RevealConfig::default()
    };
    let el = s.mount_reveal(cfg);
    s.set_layout(el, band(100.0, 100.0)).unwrap();
    assert_eq!(visibility_flips(&s.tick(Millis(0))), vec![(el, true)]);
    scroll(&mut s, 1000.0);
    assert_eq!(visibility_flips(&s.tick(Millis(16))), vec![(el, false)]);
    assert_eq!(s.stats().live_observers, 1);
}

#[test]
fn parallax_updates_only_after_a_frame() {
    let mut s = stage();
    let el = s.mount_parallax(ParallaxConfig::default()).unwrap();
    // Centered: top 300, height 200 in an 800px viewport gives p = 0.5.
    s.set_layout(el, band(300.0, 200.0)).unwrap();
    let updates = s.tick(Millis(0));
    assert!(
        !updates
            .iter()
            .any(|u| matches!(u, StageUpdate::Transform { .. }))
    );
    assert!(s.parallax_transform(el).unwrap().is_identity());

    s.platform_mut().set_scroll_y(500.0);
    // Without a scroll event no frame runs.
    assert!(s.tick(Millis(5)).is_empty());
    s.on_scroll();
    let updates = s.tick(Millis(16));
    let moved = updates.iter().find_map(|u| match u {
        StageUpdate::Transform { element, transform } if *element == el => Some(*transform),
        _ => None,
    });
    // Now top = -200 → p = 1.0 → 0.5 * 200 * 0.5 = 50px upward.
    assert_eq!(moved.unwrap().translate, Vec2::new(0.0, -50.0));
}

#[test]
fn scroll_events_coalesce_into_one_frame() {
    let mut s = stage();
    s.mount_parallax(ParallaxConfig::default()).unwrap();
    s.tick(Millis(0));
    for _ in 0..10 {
        s.on_scroll();
    }
    s.tick(Millis(16));
    assert_eq!(s.stats().frames_run, 2);
}

fn spy_stage() -> (Stage<HeadlessPlatform>, [ElementId; 3]) {
    let cfg = MotionConfig {
        spy_offset: 0.0,
        ..MotionConfig::default()
    };
    let mut s = Stage::new(platform(), cfg);
    let a = s.mount_section("a").unwrap();
    let b = s.mount_section("b").unwrap();
    let c = s.mount_section("c").unwrap();
    s.set_layout(a, band(0.0, 500.0)).unwrap();
    s.set_layout(b, band(500.0, 500.0)).unwrap();
    s.set_layout(c, band(1000.0, 500.0)).unwrap();
    (s, [a, b, c])
}

#[test]
fn scroll_spy_tracks_active_section() {
    let (mut s, _) = spy_stage();
    assert!(
        s.tick(Millis(0))
            .contains(&StageUpdate::ActiveSection {
                id: Some("a".to_owned())
            })
    );
    scroll(&mut s, 600.0);
    let updates = s.tick(Millis(16));
    assert!(updates.contains(&StageUpdate::ActiveSection {
        id: Some("b".to_owned())
    }));
    assert!(updates.contains(&StageUpdate::BackToTop { visible: true }));
    assert_eq!(s.active_section(), Some("b"));
}

#[test]
fn scroll_to_section_requests_smooth_scroll() {
    let (mut s, _) = spy_stage();
    s.tick(Millis(0));
    let req = s.scroll_to_section("c").unwrap();
    assert_eq!(req.top, 1000.0);
    s.tick(Millis(16));
    assert_eq!(s.active_section(), Some("c"));
    assert!(s.scroll_to_section("nope").is_err());
}

#[test]
fn duplicate_sections_and_stray_layouts_are_rejected() {
    let (mut s, [a, ..]) = spy_stage();
    assert!(s.mount_section("a").is_err());
    assert!(s.unmount(a));
    assert!(!s.unmount(a));
    assert!(s.set_layout(a, band(0.0, 10.0)).is_err());
}

#[test]
fn page_progress_reads_platform() {
    let mut s = stage();
    s.platform_mut().set_scroll_y(2100.0);
    assert_eq!(s.page_progress(), 0.5);
}
