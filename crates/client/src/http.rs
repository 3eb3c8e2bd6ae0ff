//! HTTP implementation of the signup API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use common::{ApiConfig, ApiReply, AppError, AppResult, Envelope, API_KEY_HEADER};
use domain::{Country, Currency, Industry, LoginRequest, Plan, RegistrationForm, Timezone};

use crate::api::*;

/// `reqwest` client bound to one API root and key.
pub struct HttpSignupClient {
    client: Client,
    config: ApiConfig,
}

impl HttpSignupClient {
    /// Build the client. The API key is sent on every request.
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        let mut key = HeaderValue::from_str(config.api_key())
            .map_err(|_| AppError::config("API key contains invalid header characters"))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        debug!("Signup API client ready for {}", config.base_url);
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str, what: &str) -> AppResult<Vec<T>> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let items = read_envelope(response).await?.into_list(what)?;
        debug!("{} loaded: {} entries", what, items.len());
        Ok(items)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<ApiReply> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        read_envelope(response).await?.into_reply()
    }
}

/// Read the envelope of a response.
///
/// A non-2xx answer that still carries an envelope with a message is the
/// server speaking in domain terms and becomes a rejection; any other
/// non-2xx is a transport failure.
async fn read_envelope(response: Response) -> AppResult<Envelope> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_slice::<Envelope>(&body) {
            if let Some(message) = envelope.message.filter(|m| !m.trim().is_empty()) {
                warn!(status = status.as_u16(), "Request rejected: {}", message);
                return Err(AppError::rejected(message));
            }
        }
        return Err(AppError::Status(status.as_u16()));
    }

    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl SignupApi for HttpSignupClient {
    async fn countries(&self) -> AppResult<Vec<Country>> {
        self.get_list(PATH_COUNTRIES, "Countries").await
    }

    async fn currencies(&self) -> AppResult<Vec<Currency>> {
        self.get_list(PATH_CURRENCIES, "Currencies").await
    }

    async fn time_zones(&self) -> AppResult<Vec<Timezone>> {
        self.get_list(PATH_TIME_ZONES, "Time zones").await
    }

    async fn industries(&self) -> AppResult<Vec<Industry>> {
        self.get_list(PATH_INDUSTRIES, "Industries").await
    }

    async fn plans(&self) -> AppResult<Vec<Plan>> {
        self.get_list(PATH_PLANS, "Plans").await
    }

    async fn login(&self, credentials: &LoginRequest) -> AppResult<ApiReply> {
        self.post(PATH_LOGIN, credentials).await
    }

    async fn register(&self, form: &RegistrationForm) -> AppResult<ApiReply> {
        self.post(PATH_REGISTER, form).await
    }
}
