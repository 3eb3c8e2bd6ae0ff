//! Signup API configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Default API root of the hosted signup service
pub const DEFAULT_API_BASE_URL: &str = "https://books.sann-erp.com/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "x-api-key";

pub const ENV_API_BASE_URL: &str = "SIGNUP_API_BASE_URL";
pub const ENV_API_KEY: &str = "SIGNUP_API_KEY";
pub const ENV_API_TIMEOUT_SECS: &str = "SIGNUP_API_TIMEOUT_SECS";

/// Connection settings of the signup API.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    api_key: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// The API key has no default; it must be injected.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::config(format!("{} must be set", ENV_API_KEY)))?;

        let timeout_secs = match env::var(ENV_API_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!("{} must be a number of seconds", ENV_API_TIMEOUT_SECS))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: env::var(ENV_API_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_key,
            timeout_secs,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of an endpoint path such as `/auth/countries`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
