//! Email verification flow state.
//!
//! The flow is: enter email → send code → (optionally resend after a
//! cooldown) → verify code. Time is passed in so the cooldown can be
//! checked without a clock dependency.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::constants::RESEND_COOLDOWN_SECONDS;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VerificationState {
    /// No code sent yet
    Idle,
    /// A code is outstanding
    CodeSent { last_sent_at: DateTime<Utc> },
    /// The code was accepted
    Verified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailVerification {
    email: String,
    state: VerificationState,
}

impl Default for EmailVerification {
    fn default() -> Self {
        Self {
            email: String::new(),
            state: VerificationState::Idle,
        }
    }
}

impl EmailVerification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// The email can be edited until a code has been sent to it.
    pub fn set_email(&mut self, email: &str) -> DomainResult<()> {
        if self.state != VerificationState::Idle {
            return Err(DomainError::invalid_state(
                "The email cannot change after a code was sent",
            ));
        }
        self.email = email.trim().to_string();
        Ok(())
    }

    /// "Send code" is enabled for a non-blank email before the first send.
    pub fn can_send(&self) -> bool {
        self.state == VerificationState::Idle && !self.email.is_empty()
    }

    pub fn code_sent(&self) -> bool {
        matches!(self.state, VerificationState::CodeSent { .. })
    }

    /// Time left before "resend" is enabled; `None` when it already is or
    /// when no code is outstanding.
    pub fn resend_available_in(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.state {
            VerificationState::CodeSent { last_sent_at } => {
                let ready_at = last_sent_at + Duration::seconds(RESEND_COOLDOWN_SECONDS);
                (ready_at > now).then(|| ready_at - now)
            }
            _ => None,
        }
    }

    pub fn can_resend(&self, now: DateTime<Utc>) -> bool {
        self.code_sent() && self.resend_available_in(now).is_none()
    }

    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.can_send() {
            return Err(DomainError::invalid_state(if self.email.is_empty() {
                "Enter an email address first"
            } else {
                "A verification code was already sent"
            }));
        }
        self.state = VerificationState::CodeSent { last_sent_at: now };
        Ok(())
    }

    pub fn mark_resent(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.code_sent() {
            return Err(DomainError::invalid_state("No verification code was sent yet"));
        }
        if let Some(wait) = self.resend_available_in(now) {
            return Err(DomainError::invalid_state(format!(
                "Please wait {} seconds before requesting a new code",
                wait.num_seconds().max(1)
            )));
        }
        self.state = VerificationState::CodeSent { last_sent_at: now };
        Ok(())
    }

    /// A code can be checked only while one is outstanding.
    pub fn ensure_awaiting_code(&self) -> DomainResult<()> {
        if self.code_sent() {
            Ok(())
        } else {
            Err(DomainError::invalid_state("No verification code is pending"))
        }
    }

    pub fn mark_verified(&mut self) -> DomainResult<()> {
        self.ensure_awaiting_code()?;
        self.state = VerificationState::Verified;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_send_requires_email() {
        let mut flow = EmailVerification::new();
        assert!(!flow.can_send());
        assert!(flow.mark_sent(at(0)).is_err());

        flow.set_email("  owner@acme.test ").unwrap();
        assert_eq!(flow.email(), "owner@acme.test");
        assert!(flow.mark_sent(at(0)).is_ok());
        assert!(!flow.can_send());
    }

    #[test]
    fn test_resend_cooldown() {
        let mut flow = EmailVerification::new();
        flow.set_email("owner@acme.test").unwrap();
        flow.mark_sent(at(0)).unwrap();

        assert!(!flow.can_resend(at(59)));
        assert_eq!(flow.resend_available_in(at(45)), Some(Duration::seconds(15)));
        assert!(flow.mark_resent(at(30)).is_err());

        assert!(flow.can_resend(at(60)));
        flow.mark_resent(at(60)).unwrap();
        assert!(!flow.can_resend(at(100)));
        assert!(flow.can_resend(at(120)));
    }

    #[test]
    fn test_email_locked_after_send() {
        let mut flow = EmailVerification::new();
        flow.set_email("owner@acme.test").unwrap();
        flow.mark_sent(at(0)).unwrap();
        assert!(flow.set_email("other@acme.test").is_err());
    }

    #[test]
    fn test_verify_requires_pending_code() {
        let mut flow = EmailVerification::new();
        assert!(flow.mark_verified().is_err());

        flow.set_email("owner@acme.test").unwrap();
        flow.mark_sent(at(0)).unwrap();
        flow.mark_verified().unwrap();
        assert_eq!(flow.state(), VerificationState::Verified);
        assert!(!flow.can_resend(at(500)));
    }
}
