//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Organization signup client
#[derive(Parser, Debug)]
#[command(name = "signup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and print the reference lists
    Lists(ListsArgs),

    /// Show the dependent fields derived from a few selections
    Resolve(ResolveArgs),

    /// Submit a registration from a JSON draft
    Register(RegisterArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Verify an email address interactively
    VerifyEmail(VerifyEmailArgs),
}

/// Arguments for the lists command
#[derive(Parser, Debug)]
pub struct ListsArgs {
    /// Label language (en or ar)
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Print the raw lists as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Selected country id
    #[arg(long)]
    pub country: Option<String>,

    /// Selected state id
    #[arg(long)]
    pub state: Option<String>,

    /// Selected plan id
    #[arg(long)]
    pub plan: Option<String>,

    /// Selected plan price id
    #[arg(long)]
    pub price: Option<String>,

    /// Label language (en or ar)
    #[arg(short, long, default_value = "en")]
    pub lang: String,
}

/// Arguments for the register command
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// JSON object keyed by field name
    #[arg(short, long)]
    pub draft: PathBuf,
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, env = "SIGNUP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the verify-email command
#[derive(Parser, Debug)]
pub struct VerifyEmailArgs {
    #[arg(short, long)]
    pub email: String,

    /// Code accepted by the verification step
    #[arg(long, env = "SIGNUP_VERIFICATION_CODE", hide_env_values = true)]
    pub code: String,
}
