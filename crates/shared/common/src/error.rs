//! Unified error handling for the signup client.
//!
//! Four classes of failure reach a screen:
//! - field validation errors, shown inline next to each field
//! - transport errors (network, timeout, non-2xx), shown as a generic banner
//! - domain errors (`success: false`), shown with the server message verbatim
//! - stale reference selections, which never become errors at all

use domain::{DomainError, Field, FieldErrors};
use thiserror::Error;

/// Banner text used when the server could not be reached.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client-side validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0} is derived and cannot be edited")]
    ReadOnlyField(Field),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Domain-level failure reported by the API
    #[error("{0}")]
    Rejected(String),

    // Transport
    #[error("Request timed out")]
    Timeout,

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    // Setup
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ReadOnlyField(_) => "READ_ONLY_FIELD",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Rejected(_) => "REJECTED",
            AppError::Timeout => "TIMEOUT",
            AppError::Status(_) => "HTTP_STATUS",
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Network failure, timeout, non-2xx or unreadable body
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Timeout | AppError::Status(_) | AppError::Transport(_) | AppError::Decode(_)
        )
    }

    /// The API answered with `success: false`
    pub fn is_rejected(&self) -> bool {
        matches!(self, AppError::Rejected(_))
    }

    /// Get user-facing message (hides transport details)
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE_MESSAGE)
    }

    /// Get user-facing message, using `fallback` wherever details are hidden.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            // Show the server message verbatim
            AppError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            AppError::Rejected(_) => fallback.to_string(),

            // Show full message for client errors
            AppError::Validation(_) => "Please correct the highlighted fields".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::ReadOnlyField(_) => self.to_string(),

            // Hide details for transport/internal errors
            AppError::Timeout | AppError::Status(_) | AppError::Transport(_) | AppError::Decode(_) => {
                tracing::error!(code = self.code(), "Request failed: {}", self);
                fallback.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                fallback.to_string()
            }
            AppError::Config(_) => self.to_string(),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::ReadOnlyField(field) => AppError::ReadOnlyField(field),
            DomainError::UnknownField(_)
            | DomainError::InvalidValue { .. }
            | DomainError::InvalidState(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Status(status.as_u16())
        } else if err.is_builder() {
            AppError::Config(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        AppError::Rejected(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
