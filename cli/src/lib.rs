//! Command-line front end of the signup client.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
