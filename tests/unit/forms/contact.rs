use super::*;

fn good() -> ContactForm {
    ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: String::new(),
        message: "Hello, I'd like to talk.".into(),
    }
}

#[test]
fn valid_form_passes() {
    assert!(good().validate().is_ok());
}

#[test]
fn every_bad_field_is_reported() {
    let form = ContactForm {
        name: " A ".into(),
        email: "ada@".into(),
        subject: "x".repeat(121),
        message: "short".into(),
    };
    let err = form.validate().unwrap_err();
    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "email", "subject", "message"]);
    assert_eq!(err.to_string(), "invalid form: 4 field(s) rejected");
}

#[test]
fn email_shapes() {
    for ok in ["a@b.co", "first.last@sub.example.org"] {
        assert!(is_valid_email(ok), "{ok}");
    }
    for bad in ["", "plain", "@b.co", "a@b", "a@b.", "a@@b.co", "a b@c.io", "a@.co"] {
        assert!(!is_valid_email(bad), "{bad}");
    }
}

#[test]
fn trimmed_strips_whitespace() {
    let form = ContactForm {
        name: "  Ada ".into(),
        ..good()
    };
    assert_eq!(form.trimmed().name, "Ada");
}

#[test]
fn loading_tracker_counts_nested_starts() {
    let mut t = LoadingTracker::new();
    assert!(!t.is_loading());
    t.start("submit");
    t.start("submit");
    t.start("projects");
    assert!(t.finish("submit"));
    assert!(t.is_loading_key("submit"));
    assert!(t.finish("submit"));
    assert!(!t.is_loading_key("submit"));
    assert_eq!(t.keys().collect::<Vec<_>>(), vec!["projects"]);
    assert!(t.finish("projects"));
    assert!(!t.finish("projects"));
    assert!(!t.is_loading());
}
