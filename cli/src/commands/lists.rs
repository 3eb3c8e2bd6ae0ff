//! Lists command - Fetch and print the reference lists.

use std::sync::Arc;

use common::{AppError, AppResult};
use domain::reference::labels;
use domain::{Language, RefId};
use signup_client::{load_reference_lists, SignupApi};

use crate::args::ListsArgs;

/// Execute the lists command
pub async fn execute(args: ListsArgs, api: Arc<dyn SignupApi>) -> AppResult<()> {
    let load = load_reference_lists(api.as_ref()).await;

    if args.json {
        let json = serde_json::to_string_pretty(&load.lists)
            .map_err(|e| AppError::internal(e.to_string()))?;
        println!("{}", json);
    } else {
        let language = Language::from_code(&args.lang);
        let lists = &load.lists;
        print_section("Countries", labels(&lists.countries, language));
        print_section("Currencies", labels(&lists.currencies, language));
        print_section("Time zones", labels(&lists.time_zones, language));
        print_section("Industries", labels(&lists.industries, language));
        print_section("Plans", labels(&lists.plans, language));
    }

    for (kind, e) in &load.failures {
        eprintln!("Could not load {}: {}", kind, e.user_message());
    }
    Ok(())
}

fn print_section(title: &str, options: Vec<(RefId, String)>) {
    println!("{} ({})", title, options.len());
    for (id, label) in options {
        println!("  {:>6}  {}", id.to_string(), label);
    }
}
