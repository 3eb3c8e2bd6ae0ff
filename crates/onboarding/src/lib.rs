//! Headless form sessions of the signup flow.
//!
//! Each session exposes the state a renderer binds to: values, option sets,
//! visible fields, errors of touched fields and the feedback dialog.

pub mod feedback;
pub mod login;
pub mod registration;
pub mod verification;

pub use feedback::{Feedback, FeedbackKind};
pub use login::LoginSession;
pub use registration::RegistrationSession;
pub use verification::{EmailVerificationSession, StaticCodeChannel, VerificationChannel};

#[cfg(any(test, feature = "test-utils"))]
pub use verification::MockVerificationChannel;
