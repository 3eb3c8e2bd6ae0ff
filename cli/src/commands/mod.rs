//! CLI command implementations.

pub mod lists;
pub mod login;
pub mod register;
pub mod resolve;
pub mod verify;

use common::{AppError, AppResult};
use domain::FieldErrors;
use onboarding::Feedback;

fn print_feedback(feedback: &Feedback) {
    println!("{}", feedback.title);
    if !feedback.message.is_empty() {
        println!("  {}", feedback.message);
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("  {:<32} {}", field.label(), message);
    }
}

/// Print a dialog and turn an error dialog into a failing exit status.
fn finish(feedback: Feedback) -> AppResult<()> {
    print_feedback(&feedback);
    if feedback.is_success() {
        Ok(())
    } else {
        Err(AppError::rejected(feedback.message))
    }
}
