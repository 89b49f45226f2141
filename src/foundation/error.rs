/// Convenience result type used across scrollkit.
pub type ScrollkitResult<T> = Result<T, ScrollkitError>;

/// One rejected form field and the message shown next to it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    /// Field name as the form knows it (`"email"`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Coarse error buckets used to pick user-facing wording and retry behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad input; fix and resubmit.
    Validation,
    /// Transport or service unavailability; retryable.
    Network,
    /// Caller may not perform the operation.
    Permission,
    /// Referenced record does not exist.
    NotFound,
    /// Anything else.
    Unknown,
}

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollkitError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A form failed validation; carries one entry per rejected field.
    #[error("invalid form: {} field(s) rejected", .0.len())]
    InvalidForm(Vec<FieldError>),

    /// A document lookup missed.
    #[error("not found: {collection}/{id}")]
    NotFound {
        /// Collection name.
        collection: String,
        /// Document id.
        id: String,
    },

    /// The store refused a write.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Transport or backend failure.
    #[error("network error: {0}")]
    Network(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollkitError {
    /// Build a [`ScrollkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollkitError::NotFound`] value.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Build a [`ScrollkitError::Permission`] value.
    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Permission(msg.into())
    }

    /// Build a [`ScrollkitError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Build a [`ScrollkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Bucket this error for display and retry decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::InvalidForm(_) | Self::Serde(_) => {
                ErrorCategory::Validation
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Permission(_) => ErrorCategory::Permission,
            Self::Network(_) => ErrorCategory::Network,
            Self::Other(_) => ErrorCategory::Unknown,
        }
    }

    /// Only network failures are worth retrying automatically.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    /// Message safe to show an end user. Technical detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Please check the highlighted fields and try again.",
            ErrorCategory::Network => "Network error. Please check your connection and try again.",
            ErrorCategory::Permission => "You don't have permission to do that.",
            ErrorCategory::NotFound => "The requested item could not be found.",
            ErrorCategory::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Field-level messages, empty unless this is [`ScrollkitError::InvalidForm`].
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::InvalidForm(fields) => fields,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ScrollkitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
