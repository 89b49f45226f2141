use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollkitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollkitError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(
        ScrollkitError::permission("x")
            .to_string()
            .contains("permission denied:")
    );
    assert_eq!(
        ScrollkitError::not_found("projects", "p1").to_string(),
        "not found: projects/p1"
    );
}

#[test]
fn categories_drive_retry_and_wording() {
    assert!(ScrollkitError::network("timeout").is_retryable());
    assert!(!ScrollkitError::validation("bad").is_retryable());
    assert_eq!(
        ScrollkitError::not_found("a", "b").category(),
        ErrorCategory::NotFound
    );
    let other = ScrollkitError::Other(anyhow::anyhow!("stack trace here"));
    assert_eq!(other.category(), ErrorCategory::Unknown);
    assert!(!other.user_message().contains("stack trace"));
}

#[test]
fn invalid_form_exposes_fields() {
    let err = ScrollkitError::InvalidForm(vec![FieldError::new("email", "required")]);
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.field_errors().len(), 1);
    assert!(ScrollkitError::network("x").field_errors().is_empty());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollkitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
