//! Common utilities shared across the signup crates.
//!
//! This crate provides:
//! - Unified error handling with user-facing messages
//! - The API response envelope
//! - API configuration

pub mod config;
pub mod envelope;
pub mod error;

pub use config::*;
pub use envelope::{ApiReply, Envelope};
pub use error::{AppError, AppResult, GENERIC_FAILURE_MESSAGE};
