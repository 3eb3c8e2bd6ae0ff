//! Login command.

use std::sync::Arc;

use common::AppResult;
use onboarding::LoginSession;
use signup_client::SignupApi;

use super::finish;
use crate::args::LoginArgs;

/// Execute the login command
pub async fn execute(args: LoginArgs, api: Arc<dyn SignupApi>) -> AppResult<()> {
    let mut session = LoginSession::new(api);
    session.set_email(&args.email);
    session.set_password(&args.password);

    let feedback = session.submit().await?;
    finish(feedback)
}
