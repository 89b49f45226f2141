use super::*;

#[test]
fn project_requires_title_and_description() {
    let err = Project::default().validate().unwrap_err();
    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "description"]);
}

#[test]
fn project_urls_must_be_http() {
    let p = Project {
        title: "Site".into(),
        description: "A site".into(),
        live_url: Some("ftp://example.com".into()),
        repo_url: Some("https://github.com/me/site".into()),
        ..Project::default()
    };
    let err = p.validate().unwrap_err();
    assert_eq!(err.field_errors(), [FieldError::new("live_url", "must be an http(s) URL")]);
}

#[test]
fn skill_level_is_a_percentage() {
    let s = Skill {
        name: "Rust".into(),
        level: 101,
        ..Skill::default()
    };
    assert!(s.validate().is_err());
    assert!(Skill { level: 100, ..s }.validate().is_ok());
}

#[test]
fn experience_end_not_before_start() {
    let e = Experience {
        company: "Acme".into(),
        role: "Engineer".into(),
        start: "2021-06".into(),
        end: Some("2020-01".into()),
        ..Experience::default()
    };
    assert_eq!(e.validate().unwrap_err().field_errors()[0].field, "end");
    assert!(Experience { end: None, ..e }.validate().is_ok());
}

#[test]
fn testimonial_needs_author_and_quote() {
    let t = Testimonial {
        author: "Sam".into(),
        quote: "  ".into(),
        ..Testimonial::default()
    };
    assert_eq!(t.validate().unwrap_err().field_errors()[0].field, "quote");
}

#[test]
fn optional_fields_are_omitted_when_serialized() {
    let v = serde_json::to_value(Testimonial {
        author: "Sam".into(),
        quote: "Great".into(),
        ..Testimonial::default()
    })
    .unwrap();
    assert!(v.get("avatar_url").is_none());
    assert_eq!(v["order"], 0);
}
