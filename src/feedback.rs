//! User-facing error and status reporting, plus retry with exponential backoff.

use crate::foundation::core::Millis;
use crate::foundation::error::{ScrollkitError, ScrollkitResult};

/// Visual flavor of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    /// Failure.
    Error,
    /// Completed action.
    Success,
    /// Neutral notice.
    Info,
    /// Degraded but not failed.
    Warning,
}

/// Transient notification shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Toast {
    /// Unique per reporter.
    pub id: u64,
    /// Flavor.
    pub kind: ToastKind,
    /// Text shown to the user.
    pub message: String,
    /// When the toast disappears on its own.
    pub expires_at: Millis,
}

/// Turns errors into logged detail plus a friendly toast.
#[derive(Clone, Debug)]
pub struct ErrorReporter {
    ttl: Millis,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(Millis(5000))
    }
}

impl ErrorReporter {
    /// Reporter whose toasts live for `ttl`.
    pub fn new(ttl: Millis) -> Self {
        Self {
            ttl,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    fn push(&mut self, kind: ToastKind, message: String, now: Millis) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message,
            expires_at: now.saturating_add(self.ttl),
        });
        self.next_id
    }

    /// Log `err` with full detail and show its user-safe message. Returns the toast id.
    pub fn report(&mut self, err: &ScrollkitError, now: Millis) -> u64 {
        let category = err.category();
        tracing::error!(?category, error = %err, "operation failed");
        for field in err.field_errors() {
            tracing::debug!(field = %field.field, message = %field.message, "field rejected");
        }
        self.push(ToastKind::Error, err.user_message().to_owned(), now)
    }

    /// Show a success toast.
    pub fn success(&mut self, message: impl Into<String>, now: Millis) -> u64 {
        self.push(ToastKind::Success, message.into(), now)
    }

    /// Show an informational toast.
    pub fn info(&mut self, message: impl Into<String>, now: Millis) -> u64 {
        self.push(ToastKind::Info, message.into(), now)
    }

    /// Show a warning toast.
    pub fn warning(&mut self, message: impl Into<String>, now: Millis) -> u64 {
        self.push(ToastKind::Warning, message.into(), now)
    }

    /// Drop toasts whose time is up. Returns how many were removed.
    pub fn expire(&mut self, now: Millis) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    /// Close one toast early.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    /// Toasts currently on screen, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Backoff parameters for [`retry_operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total tries, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay after the first failure.
    pub base_delay: Millis,
    /// Upper bound on any single delay.
    pub max_delay: Millis,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Millis(1000),
            max_delay: Millis(10_000),
        }
    }
}

impl RetryPolicy {
    /// Wait before attempt `failed + 1`, given `failed >= 1` failures so far.
    pub fn delay_after(&self, failed: u32) -> Millis {
        let factor = 1u64.checked_shl(failed.saturating_sub(1)).unwrap_or(u64::MAX);
        Millis(self.base_delay.0.saturating_mul(factor).min(self.max_delay.0))
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or runs out of attempts.
///
/// `op` receives the 1-based attempt number. `sleep` is called between attempts with the
/// backoff delay; callers decide whether that blocks, advances a fake clock, or schedules.
pub fn retry_operation<T>(
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Millis),
    mut op: impl FnMut(u32) -> ScrollkitResult<T>,
) -> ScrollkitResult<T> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && attempt < attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(attempt, %delay, error = %e, "retrying");
                sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/feedback/toast.rs"]
mod tests;
