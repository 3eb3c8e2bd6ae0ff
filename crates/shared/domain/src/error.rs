//! Domain-level errors.
//!
//! These errors represent signup rule violations and misuse of the form
//! model. They are independent of transport concerns (HTTP, CLI).

use thiserror::Error;

use crate::field::Field;
use crate::validation::FieldErrors;

/// Domain-specific errors for form and flow rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Attempt to write a field whose value is derived from another one
    #[error("{0} is derived and cannot be edited")]
    ReadOnlyField(Field),

    /// Field name not part of the registration form
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Value could not be interpreted for the field
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: Field, reason: String },

    /// Operation not allowed in the current flow state
    #[error("{0}")]
    InvalidState(String),
}

impl DomainError {
    /// Create an invalid value error
    pub fn invalid_value(field: Field, reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        DomainError::InvalidState(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
