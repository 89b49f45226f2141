use super::*;

#[test]
fn endpoints_are_fixed_for_every_curve() {
    for e in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ] {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
        assert_eq!(e.apply(-1.0), 0.0, "{e:?}");
    }
}

#[test]
fn out_cubic_leads_linear() {
    assert!(Ease::OutCubic.apply(0.3) > Ease::Linear.apply(0.3));
    assert!(Ease::InCubic.apply(0.3) < Ease::Linear.apply(0.3));
}

#[test]
fn parses_css_and_snake_names() {
    assert_eq!("ease-out".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert_eq!("in_out_quad".parse::<Ease>().unwrap(), Ease::InOutQuad);
    assert!("bounce".parse::<Ease>().is_err());
    assert_eq!(Ease::Linear.css(), "linear");
}
