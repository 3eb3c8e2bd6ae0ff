//! Email verification session.
//!
//! Code delivery and checking are behind [`VerificationChannel`]; the
//! session owns the cooldown and the state machine.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use common::{AppError, AppResult};
use domain::{
    EmailVerification, VerificationState, MSG_CODE_INCORRECT, MSG_CODE_RESENT, MSG_CODE_SENT,
    MSG_EMAIL_VERIFIED,
};

use crate::feedback::Feedback;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const VERIFY_SUCCESS_TITLE: &str = "Success!";
pub const VERIFY_ERROR_TITLE: &str = "Error!";

/// Delivers and checks verification codes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VerificationChannel: Send + Sync {
    /// Deliver a fresh code to `email`
    async fn send_code(&self, email: &str) -> AppResult<()>;

    /// Whether `code` is the one delivered to `email`
    async fn check_code(&self, email: &str, code: &str) -> AppResult<bool>;
}

/// Channel that accepts one configured code and delivers nothing.
pub struct StaticCodeChannel {
    code: String,
}

impl StaticCodeChannel {
    pub fn new(code: impl Into<String>) -> AppResult<Self> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(AppError::config("Verification code must not be empty"));
        }
        Ok(Self { code })
    }
}

#[async_trait]
impl VerificationChannel for StaticCodeChannel {
    async fn send_code(&self, email: &str) -> AppResult<()> {
        info!("Verification code issued for {}", email);
        Ok(())
    }

    async fn check_code(&self, _email: &str, code: &str) -> AppResult<bool> {
        Ok(code.trim() == self.code)
    }
}

pub struct EmailVerificationSession {
    channel: Arc<dyn VerificationChannel>,
    flow: EmailVerification,
    code: String,
    message: Option<Feedback>,
}

impl EmailVerificationSession {
    pub fn new(channel: Arc<dyn VerificationChannel>) -> Self {
        Self {
            channel,
            flow: EmailVerification::new(),
            code: String::new(),
            message: None,
        }
    }

    pub fn state(&self) -> VerificationState {
        self.flow.state()
    }

    pub fn email(&self) -> &str {
        self.flow.email()
    }

    /// Last status line shown under the form
    pub fn message(&self) -> Option<&Feedback> {
        self.message.as_ref()
    }

    pub fn set_email(&mut self, email: &str) -> AppResult<()> {
        Ok(self.flow.set_email(email)?)
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
    }

    pub fn can_send(&self) -> bool {
        self.flow.can_send()
    }

    pub fn can_resend(&self, now: DateTime<Utc>) -> bool {
        self.flow.can_resend(now)
    }

    pub fn resend_available_in(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.flow.resend_available_in(now)
    }

    fn report(&mut self, feedback: Feedback) -> Feedback {
        self.message = Some(feedback.clone());
        feedback
    }

    /// Send the first code. Disabled once a code was sent.
    pub async fn send_code(&mut self, now: DateTime<Utc>) -> AppResult<Feedback> {
        let mut next = self.flow.clone();
        next.mark_sent(now)?;
        self.channel.send_code(next.email()).await?;
        self.flow = next;
        Ok(self.report(Feedback::success(VERIFY_SUCCESS_TITLE, MSG_CODE_SENT)))
    }

    /// Send another code once the cooldown has elapsed.
    pub async fn resend_code(&mut self, now: DateTime<Utc>) -> AppResult<Feedback> {
        let mut next = self.flow.clone();
        next.mark_resent(now)?;
        self.channel.send_code(next.email()).await?;
        self.flow = next;
        Ok(self.report(Feedback::success(VERIFY_SUCCESS_TITLE, MSG_CODE_RESENT)))
    }

    /// Check the entered code against the channel.
    pub async fn verify(&mut self) -> AppResult<Feedback> {
        self.flow.ensure_awaiting_code()?;
        let accepted = self.channel.check_code(self.flow.email(), &self.code).await?;
        debug!(accepted, "Verification code checked");

        if !accepted {
            return Ok(self.report(Feedback::error(VERIFY_ERROR_TITLE, MSG_CODE_INCORRECT)));
        }
        self.flow.mark_verified()?;
        Ok(self.report(Feedback::success(VERIFY_SUCCESS_TITLE, MSG_EMAIL_VERIFIED)))
    }
}
