//! Login session.

use std::sync::Arc;

use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::LoginRequest;
use signup_client::SignupApi;

use crate::feedback::Feedback;

pub const LOGIN_SUCCESS_TITLE: &str = "Login Successfully!";
pub const LOGIN_ERROR_TITLE: &str = "Error!";

pub struct LoginSession {
    api: Arc<dyn SignupApi>,
    email: String,
    password: String,
    feedback: Option<Feedback>,
}

impl LoginSession {
    pub fn new(api: Arc<dyn SignupApi>) -> Self {
        Self {
            api,
            email: String::new(),
            password: String::new(),
            feedback: None,
        }
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn request(&self) -> LoginRequest {
        LoginRequest::new(&self.email, &self.password)
    }

    /// The submit button is enabled only when both fields are non-blank.
    pub fn can_submit(&self) -> bool {
        self.request().is_complete()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Dismiss the dialog
    pub fn close_feedback(&mut self) {
        self.feedback = None;
    }

    /// Post the credentials.
    ///
    /// Blank input is refused before any call is made. Once posted, both
    /// outcomes are reported as feedback.
    pub async fn submit(&mut self) -> AppResult<Feedback> {
        let request = self.request();
        request.check().map_err(AppError::bad_request)?;

        let feedback = match self.api.login(&request).await {
            Ok(reply) => {
                info!("Login accepted for {}", request.email);
                Feedback::success(LOGIN_SUCCESS_TITLE, reply.message.unwrap_or_default())
            }
            Err(e) => {
                warn!(code = e.code(), "Login failed: {}", e);
                Feedback::error(LOGIN_ERROR_TITLE, e.user_message())
            }
        };

        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }
}
