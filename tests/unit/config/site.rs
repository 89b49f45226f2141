use super::*;
use crate::animation::style::AnimationName;
use crate::foundation::core::Viewport;
use crate::platform::HeadlessPlatform;

fn platform(dark: bool, reduced: bool) -> HeadlessPlatform {
    let mut p = HeadlessPlatform::new(Viewport::new(800.0, 600.0).unwrap(), 3000.0);
    p.dark_scheme = dark;
    p.reduced_motion = reduced;
    p
}

#[test]
fn empty_json_yields_defaults() {
    let cfg = SiteConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.motion.stagger, Millis(150));
    assert!(cfg.motion.reveal.trigger_once);
    assert_eq!(cfg.motion.reveal.threshold.get(), 0.1);
    assert_eq!(cfg.motion.reveal.root_margin.to_string(), "0px 0px -50px 0px");
}

#[test]
fn partial_overrides_merge_with_defaults() {
    let json = r#"{
        "motion": {
            "reveal": { "animation": "fadeInUp", "delay": 100 },
            "spy_offset": 64,
            "reduced_motion": true
        },
        "theme": { "mode": "dark" }
    }"#;
    let cfg = SiteConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.motion.reveal.animation, AnimationName::SlideUp);
    assert_eq!(cfg.motion.reveal.delay, Millis(100));
    assert_eq!(cfg.motion.reveal.duration, Millis(600));
    assert_eq!(cfg.motion.spy_offset, 64.0);
    assert_eq!(cfg.theme.mode, ThemeMode::Dark);
    assert!(cfg.motion.reduced_motion(&platform(false, false)));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(SiteConfig::from_reader(r#"{"motion":{"reveal":{"threshold":3}}}"#.as_bytes()).is_err());
    assert!(
        SiteConfig::from_reader(r#"{"motion":{"back_to_top":{"threshold":-1}}}"#.as_bytes())
            .is_err()
    );
    assert!(SiteConfig::from_reader("not json".as_bytes()).is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = SiteConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open site config"));
}

#[test]
fn theme_follows_system_until_toggled() {
    let mut theme = ThemeConfig::default();
    assert_eq!(theme.resolve(&platform(true, false)), ResolvedTheme::Dark);
    assert_eq!(theme.resolve(&platform(false, false)), ResolvedTheme::Light);

    let p = platform(true, false);
    assert_eq!(theme.toggle(&p), ResolvedTheme::Light);
    assert_eq!(theme.mode, ThemeMode::Light);
    assert_eq!(ResolvedTheme::Dark.css_class(), "theme-dark");
}

#[test]
fn reduced_motion_defers_to_platform_without_override() {
    let cfg = MotionConfig::default();
    assert!(cfg.reduced_motion(&platform(false, true)));
    assert!(!cfg.reduced_motion(&platform(false, false)));
}
