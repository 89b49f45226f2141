use super::*;

#[test]
fn stagger_delays_are_linear_in_input_order() {
    assert_eq!(
        stagger_delays(3, Millis(0), Millis(150)),
        vec![Millis(0), Millis(150), Millis(300)]
    );
    assert_eq!(
        stagger_delays(2, Millis(100), Millis(50)),
        vec![Millis(100), Millis(150)]
    );
    assert!(stagger_delays(0, Millis(0), Millis(150)).is_empty());
}

#[test]
fn plan_keeps_children_in_order() {
    let plan = StaggerPlan::stagger(vec!["a", "b", "c"], RevealConfig::default(), Millis(150));
    let got: Vec<(usize, &str, u64)> = plan
        .items()
        .iter()
        .map(|i| (i.index, i.child, i.reveal.delay.0))
        .collect();
    assert_eq!(got, vec![(0, "a", 0), (1, "b", 150), (2, "c", 300)]);
}

#[test]
fn plan_offsets_from_base_delay() {
    let base = RevealConfig::default().with_delay(Millis(200));
    let plan = StaggerPlan::stagger(vec![(), ()], base, Millis(100));
    let delays: Vec<u64> = plan.items().iter().map(|i| i.reveal.delay.0).collect();
    assert_eq!(delays, vec![200, 300]);
}

#[test]
fn sequence_cycles_by_default() {
    use AnimationName::*;
    let names = sequence_animations(5, &[Fade, SlideUp], SequencePolicy::default()).unwrap();
    assert_eq!(names, vec![Fade, SlideUp, Fade, SlideUp, Fade]);
}

#[test]
fn sequence_hold_last_and_strict() {
    use AnimationName::*;
    assert_eq!(
        sequence_animations(3, &[Scale], SequencePolicy::HoldLast).unwrap(),
        vec![Scale, Scale, Scale]
    );
    assert_eq!(
        sequence_animations(1, &[Scale, Rotate], SequencePolicy::Strict)
            .unwrap_err()
            .to_string(),
        "validation error: sequence has 1 children but 2 animation names"
    );
    assert_eq!(
        sequence_animations(2, &[Scale, Rotate], SequencePolicy::Strict).unwrap(),
        vec![Scale, Rotate]
    );
}

#[test]
fn sequence_needs_names_unless_empty() {
    assert!(sequence_animations(2, &[], SequencePolicy::Cycle).is_err());
    assert!(
        sequence_animations(0, &[], SequencePolicy::Cycle)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn sequence_plan_assigns_names_and_delays() {
    use AnimationName::*;
    let plan = StaggerPlan::sequence(
        vec![1, 2, 3],
        RevealConfig::default(),
        Millis(100),
        &[SlideLeft, SlideRight],
        SequencePolicy::Cycle,
    )
    .unwrap();
    let got: Vec<(AnimationName, u64)> = plan
        .items()
        .iter()
        .map(|i| (i.reveal.animation, i.reveal.delay.0))
        .collect();
    assert_eq!(got, vec![(SlideLeft, 0), (SlideRight, 100), (SlideLeft, 200)]);
}
