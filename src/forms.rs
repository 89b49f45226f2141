//! Contact form validation and in-flight operation tracking.

use std::collections::BTreeMap;

use crate::foundation::error::{FieldError, ScrollkitError, ScrollkitResult};

const NAME_MIN: usize = 2;
const MESSAGE_MIN: usize = 10;
const SUBJECT_MAX: usize = 120;

/// Submission from the contact section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Optional subject line.
    #[serde(default)]
    pub subject: String,
    /// Body.
    pub message: String,
}

/// `local@domain.tld`: one `@`, non-empty local part, dotted domain without empty labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

impl ContactForm {
    /// Check every field and report all failures at once.
    pub fn validate(&self) -> ScrollkitResult<()> {
        let mut errors = Vec::new();
        if self.name.trim().chars().count() < NAME_MIN {
            errors.push(FieldError::new(
                "name",
                format!("name must be at least {NAME_MIN} characters"),
            ));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "enter a valid email address"));
        }
        if self.subject.trim().chars().count() > SUBJECT_MAX {
            errors.push(FieldError::new(
                "subject",
                format!("subject must be at most {SUBJECT_MAX} characters"),
            ));
        }
        if self.message.trim().chars().count() < MESSAGE_MIN {
            errors.push(FieldError::new(
                "message",
                format!("message must be at least {MESSAGE_MIN} characters"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScrollkitError::InvalidForm(errors))
        }
    }

    /// Copy with surrounding whitespace stripped, as it would be submitted.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }
}

/// Named in-flight operations; the page shows a spinner while any are running.
///
/// Starting the same key twice needs two finishes.
#[derive(Clone, Debug, Default)]
pub struct LoadingTracker {
    in_flight: BTreeMap<String, u32>,
}

impl LoadingTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as running.
    pub fn start(&mut self, key: impl Into<String>) {
        *self.in_flight.entry(key.into()).or_insert(0) += 1;
    }

    /// Mark one run of `key` as done. Returns `false` if it was not running.
    pub fn finish(&mut self, key: &str) -> bool {
        let Some(count) = self.in_flight.get_mut(key) else {
            tracing::debug!(key, "finish without matching start");
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.in_flight.remove(key);
        }
        true
    }

    /// Whether anything is running.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Whether `key` is running.
    pub fn is_loading_key(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Running keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.in_flight.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../tests/unit/forms/contact.rs"]
mod tests;
