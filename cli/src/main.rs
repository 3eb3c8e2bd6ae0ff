//! Signup client - Application entry point
//!
//! CLI-based entry point that dispatches to the signup commands.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{ApiConfig, AppResult};
use signup_cli::{commands, Cli, Commands};
use signup_client::{HttpSignupClient, SignupApi};

#[tokio::main]
async fn main() {
    // Load .env before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Execute command
    let result = run(cli.command).await;

    // Handle errors
    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Lists(args) => commands::lists::execute(args, connect()?).await,
        Commands::Resolve(args) => commands::resolve::execute(args, connect()?).await,
        Commands::Register(args) => commands::register::execute(args, connect()?).await,
        Commands::Login(args) => commands::login::execute(args, connect()?).await,
        Commands::VerifyEmail(args) => commands::verify::execute(args).await,
    }
}

/// Build the API client from the environment
fn connect() -> AppResult<Arc<dyn SignupApi>> {
    let config = ApiConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(Arc::new(HttpSignupClient::new(config)?))
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
