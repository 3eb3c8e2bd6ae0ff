//! The signup API surface.

use async_trait::async_trait;

use common::{ApiReply, AppResult};
use domain::{Country, Currency, Industry, LoginRequest, Plan, RegistrationForm, Timezone};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const PATH_COUNTRIES: &str = "/auth/countries";
pub const PATH_CURRENCIES: &str = "/auth/currencies";
pub const PATH_TIME_ZONES: &str = "/auth/time-zones";
pub const PATH_INDUSTRIES: &str = "/auth/industries";
pub const PATH_PLANS: &str = "/subscription/plans";
pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_REGISTER: &str = "/auth/register";

/// Signup API trait for dependency injection.
///
/// Every call is independent; a failure of one never affects another.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Countries with embedded states and currency reference
    async fn countries(&self) -> AppResult<Vec<Country>>;

    async fn currencies(&self) -> AppResult<Vec<Currency>>;

    async fn time_zones(&self) -> AppResult<Vec<Timezone>>;

    async fn industries(&self) -> AppResult<Vec<Industry>>;

    /// Subscription plans with embedded prices
    async fn plans(&self) -> AppResult<Vec<Plan>>;

    async fn login(&self, credentials: &LoginRequest) -> AppResult<ApiReply>;

    /// Submit the full registration payload
    async fn register(&self, form: &RegistrationForm) -> AppResult<ApiReply>;
}
