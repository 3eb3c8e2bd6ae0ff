//! Verify-email command - Interactive email verification.
//!
//! Sends a code, then reads lines from stdin: `resend` asks for another
//! code, `quit` stops, anything else is checked as the code.

use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use common::{AppError, AppResult};
use domain::VerificationState;
use onboarding::{EmailVerificationSession, StaticCodeChannel};

use super::print_feedback;
use crate::args::VerifyEmailArgs;

/// Execute the verify-email command
pub async fn execute(args: VerifyEmailArgs) -> AppResult<()> {
    let channel = StaticCodeChannel::new(args.code)?;
    let mut session = EmailVerificationSession::new(Arc::new(channel));

    session.set_email(&args.email)?;
    if !session.can_send() {
        return Err(AppError::bad_request("Enter an email address first"));
    }
    print_feedback(&session.send_code(Utc::now()).await?);
    println!("Enter the code, `resend` for a new one or `quit` to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?
    {
        match line.trim() {
            "" => continue,
            "quit" => break,
            "resend" => match session.resend_code(Utc::now()).await {
                Ok(feedback) => print_feedback(&feedback),
                Err(e) => println!("{}", e.user_message()),
            },
            code => {
                session.set_code(code);
                print_feedback(&session.verify().await?);
                if session.state() == VerificationState::Verified {
                    return Ok(());
                }
            }
        }
    }

    Err(AppError::bad_request("Email was not verified"))
}
