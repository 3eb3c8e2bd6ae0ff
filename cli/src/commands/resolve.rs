//! Resolve command - Show what a set of selections derives.

use std::sync::Arc;

use common::AppResult;
use domain::{Field, OptionLabel};
use onboarding::RegistrationSession;
use signup_client::SignupApi;

use crate::args::ResolveArgs;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, api: Arc<dyn SignupApi>) -> AppResult<()> {
    let mut session = RegistrationSession::mount(api).await;

    // Governing fields first
    session.set_field(Field::Language, &args.lang)?;
    let mut cleared = Vec::new();
    for (field, value) in [
        (Field::CountryId, args.country),
        (Field::CountryStateId, args.state),
        (Field::PlanId, args.plan),
        (Field::PlanPriceId, args.price),
    ] {
        if let Some(value) = value {
            session.set_field(field, &value)?;
            cleared.extend(session.resolution().cleared.iter().copied());
        }
    }

    let form = session.form();
    let language = form.display_language();

    let currency = form
        .currency_id()
        .map(|id| match session.lists().find_currency(id) {
            Some(currency) => format!("{} ({})", currency.label(language), id),
            None => id.to_string(),
        })
        .unwrap_or_else(|| "-".to_string());
    let postal_code = match form.postal_code() {
        "" => "-",
        code => code,
    };

    println!("{:<12} {}", "Currency", currency);
    println!("{:<12} {}", "Postal code", postal_code);

    for field in [Field::CountryStateId, Field::PlanPriceId] {
        println!("{}:", field.label());
        for (id, label) in session.option_labels(field) {
            let marker = if form.selection(field) == Some(&id) { "*" } else { " " };
            println!("  {} {:>6}  {}", marker, id.to_string(), label);
        }
    }

    if !cleared.is_empty() {
        let names: Vec<&str> = cleared.iter().map(|f: &Field| f.label()).collect();
        println!("Cleared stale selections: {}", names.join(", "));
    }
    Ok(())
}
