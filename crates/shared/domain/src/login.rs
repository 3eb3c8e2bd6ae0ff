//! Login credentials.

use serde::Serialize;
use validator::Validate;

use crate::constants::MSG_CREDENTIALS_REQUIRED;

/// Body of `POST /auth/login`
#[derive(Clone, Default, PartialEq, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginRequest {
    /// Credentials with surrounding whitespace removed from the email.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.trim().is_empty()
    }

    /// Message shown when the credentials are incomplete
    pub fn check(&self) -> Result<(), &'static str> {
        if self.validate().is_err() || !self.is_complete() {
            return Err(MSG_CREDENTIALS_REQUIRED);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_rejected() {
        assert_eq!(LoginRequest::new("", "secret").check(), Err(MSG_CREDENTIALS_REQUIRED));
        assert_eq!(LoginRequest::new("a@b.com", "   ").check(), Err(MSG_CREDENTIALS_REQUIRED));
        assert!(LoginRequest::new(" a@b.com ", "secret").check().is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", LoginRequest::new("a@b.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
