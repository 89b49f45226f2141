use super::*;

#[test]
fn report_shows_user_message_not_detail() {
    let mut r = ErrorReporter::new(Millis(3000));
    let id = r.report(&ScrollkitError::network("connect ECONNREFUSED 10.0.0.1:443"), Millis(100));
    let t = &r.toasts()[0];
    assert_eq!(t.id, id);
    assert_eq!(t.kind, ToastKind::Error);
    assert_eq!(t.message, "Network error. Please check your connection and try again.");
    assert_eq!(t.expires_at, Millis(3100));
}

#[test]
fn toasts_expire_and_dismiss() {
    let mut r = ErrorReporter::default();
    let a = r.success("Saved", Millis(0));
    let b = r.info("Heads up", Millis(1000));
    r.warning("Slow connection", Millis(2000));
    assert_eq!(r.expire(Millis(5000)), 1);
    assert_eq!(r.toasts()[0].id, b);
    assert!(!r.dismiss(a));
    assert!(r.dismiss(b));
    assert_eq!(r.toasts().len(), 1);
    assert_eq!(r.toasts()[0].kind, ToastKind::Warning);
}

#[test]
fn backoff_doubles_and_caps() {
    let p = RetryPolicy {
        max_attempts: 10,
        base_delay: Millis(1000),
        max_delay: Millis(5000),
    };
    let delays: Vec<u64> = (1..=5).map(|n| p.delay_after(n).0).collect();
    assert_eq!(delays, vec![1000, 2000, 4000, 5000, 5000]);
    assert_eq!(p.delay_after(200), Millis(5000));
}

#[test]
fn retries_network_errors_until_success() {
    let mut slept = Vec::new();
    let out = retry_operation(
        &RetryPolicy::default(),
        |d| slept.push(d),
        |attempt| {
            if attempt < 3 {
                Err(ScrollkitError::network("timeout"))
            } else {
                Ok(attempt)
            }
        },
    );
    assert_eq!(out.unwrap(), 3);
    assert_eq!(slept, vec![Millis(1000), Millis(2000)]);
}

#[test]
fn gives_up_after_max_attempts() {
    let mut calls = 0;
    let out: ScrollkitResult<()> = retry_operation(
        &RetryPolicy::default(),
        |_| {},
        |_| {
            calls += 1;
            Err(ScrollkitError::network("down"))
        },
    );
    assert!(out.unwrap_err().is_retryable());
    assert_eq!(calls, 3);
}

#[test]
fn non_retryable_errors_fail_fast() {
    let mut calls = 0;
    let out: ScrollkitResult<()> = retry_operation(
        &RetryPolicy::default(),
        |_| panic!("should not sleep"),
        |_| {
            calls += 1;
            Err(ScrollkitError::permission("read-only"))
        },
    );
    assert!(out.is_err());
    assert_eq!(calls, 1);
}
