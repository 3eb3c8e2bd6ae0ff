//! Register command - Submit a registration from a JSON draft.
//!
//! The draft is an object keyed by field name:
//!
//! ```json
//! { "country_id": 1, "country_state_id": 10, "email": "owner@acme.test" }
//! ```
//!
//! Fields are applied in form order so governing fields are set before the
//! fields that depend on them. Derived fields in the draft are ignored.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::Field;
use onboarding::RegistrationSession;
use signup_client::SignupApi;

use super::{finish, print_field_errors};
use crate::args::RegisterArgs;

/// Execute the register command
pub async fn execute(args: RegisterArgs, api: Arc<dyn SignupApi>) -> AppResult<()> {
    let raw = tokio::fs::read_to_string(&args.draft).await.map_err(|e| {
        AppError::bad_request(format!("Cannot read {}: {}", args.draft.display(), e))
    })?;
    let draft = parse_draft(&raw)?;

    let mut session = RegistrationSession::mount(api).await;
    for kind in session.load_failures() {
        warn!("Submitting without {}", kind);
    }
    apply_draft(&mut session, &draft)?;

    match session.submit().await {
        Ok(feedback) => finish(feedback),
        Err(AppError::Validation(errors)) => {
            println!("Please correct the following fields:");
            print_field_errors(&errors);
            Err(AppError::Validation(errors))
        }
        Err(e) => Err(e),
    }
}

/// Parse a draft file into its field map.
pub fn parse_draft(raw: &str) -> AppResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::bad_request("The draft must be a JSON object")),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write the draft onto the session in form order.
///
/// Returns the keys that were skipped (unknown or derived).
pub fn apply_draft(
    session: &mut RegistrationSession,
    draft: &Map<String, Value>,
) -> AppResult<Vec<String>> {
    let mut skipped: Vec<String> = draft
        .keys()
        .filter(|key| Field::from_str(key).is_err())
        .cloned()
        .collect();
    for key in &skipped {
        warn!("Unknown field {} in draft, ignoring", key);
    }

    for field in Field::ALL {
        let Some(value) = draft.get(field.as_str()) else {
            continue;
        };
        if field.is_derived() {
            warn!("{} is derived from other fields, ignoring", field);
            skipped.push(field.as_str().to_string());
            continue;
        }
        session.set_field(field, &as_text(value))?;
    }

    info!("Draft applied ({} fields)", draft.len() - skipped.len());
    Ok(skipped)
}
