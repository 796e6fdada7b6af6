//! # Pingdom Client
//!
//! Client for the Pingdom REST API 2.1 checks endpoints.
//!
//! Authentication uses HTTP basic auth with the account user and password
//! plus the `App-Key` header carrying the application key.
//!
//! References:
//! - [Pingdom API 2.1](https://docs.pingdom.com/api/)
//! - Base URL: `https://api.pingdom.com/api/2.1`
//! - API endpoints: `/checks`, `/checks/{checkid}`

mod error;
mod responses;

pub use error::PingdomError;
pub use responses::{
    CheckDetails, CheckResponse, CheckResponseType, CreateCheckResponse, CreatedCheck,
    HttpDetails, MessageResponse, TcpDetails,
};

use crate::constants::DEFAULT_PINGDOM_BASE_URL;
use crate::crd::RequestParams;
use crate::observability::metrics;
use crate::provider::{PingdomApi, PingdomCredentials, ProviderFactory};
use async_trait::async_trait;
use error::ErrorResponse;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info_span, Instrument};

/// Pingdom REST client
pub struct PingdomClient {
    http_client: Client,
    base_url: String,
    app_key: String,
    credentials: PingdomCredentials,
}

impl std::fmt::Debug for PingdomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingdomClient")
            .field("base_url", &self.base_url)
            .field("user", &self.credentials.user)
            .finish_non_exhaustive()
    }
}

impl PingdomClient {
    /// Create a client for the given account
    ///
    /// `base_url` defaults to the public API; tests point it at a mock server.
    pub fn new(
        credentials: PingdomCredentials,
        app_key: impl Into<String>,
        base_url: Option<&str>,
    ) -> Result<Self, PingdomError> {
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            base_url: base_url
                .unwrap_or(DEFAULT_PINGDOM_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            app_key: app_key.into(),
            credentials,
        })
    }

    /// Get base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn make_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http_client
            .request(method, url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .header("App-Key", &self.app_key)
    }

    /// Send a request and decode either the expected body or the Pingdom
    /// error envelope
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, PingdomError> {
        let start = Instant::now();
        let result = Self::execute(request).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(_) => metrics::record_provider_operation(operation, elapsed),
            Err(e) => {
                debug!(error = %e, "Pingdom {} failed", operation);
                metrics::increment_provider_operation_errors(operation);
            }
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, PingdomError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::handle_error_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| PingdomError::Decode {
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }

    /// Map an error response to a [`PingdomError`]
    fn handle_error_response(status: reqwest::StatusCode, body: &str) -> PingdomError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(envelope) => envelope.error.into(),
            Err(_) => PingdomError::Api {
                status_code: status.as_u16(),
                status_desc: status.canonical_reason().unwrap_or("Unknown").to_string(),
                message: body.to_string(),
            },
        }
    }
}

#[async_trait]
impl PingdomApi for PingdomClient {
    async fn create_check(
        &self,
        params: &RequestParams,
    ) -> Result<CreateCheckResponse, PingdomError> {
        let span = info_span!("pingdom.check.create", check.host = params.get("host").map(String::as_str));
        let request = self.make_request(Method::POST, "checks").form(params);
        self.send("create", request).instrument(span).await
    }

    async fn read_check(&self, id: i64) -> Result<CheckResponse, PingdomError> {
        let span = info_span!("pingdom.check.read", check.id = id);
        let request = self.make_request(Method::GET, &format!("checks/{id}"));
        self.send::<CheckDetails>("read", request)
            .instrument(span)
            .await
            .map(|details| details.check)
    }

    async fn update_check(
        &self,
        id: i64,
        params: &RequestParams,
    ) -> Result<MessageResponse, PingdomError> {
        let span = info_span!("pingdom.check.update", check.id = id);
        let request = self
            .make_request(Method::PUT, &format!("checks/{id}"))
            .form(params);
        self.send("update", request).instrument(span).await
    }

    async fn delete_check(&self, id: i64) -> Result<MessageResponse, PingdomError> {
        let span = info_span!("pingdom.check.delete", check.id = id);
        let request = self.make_request(Method::DELETE, &format!("checks/{id}"));
        self.send("delete", request).instrument(span).await
    }
}

/// Builds [`PingdomClient`]s sharing the controller-level application key
#[derive(Clone)]
pub struct PingdomClientFactory {
    app_key: String,
    base_url: String,
}

impl std::fmt::Debug for PingdomClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingdomClientFactory")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PingdomClientFactory {
    pub fn new(app_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            base_url: base_url.into(),
        }
    }
}

impl ProviderFactory for PingdomClientFactory {
    fn create(&self, credentials: PingdomCredentials) -> Result<Box<dyn PingdomApi>, PingdomError> {
        let client = PingdomClient::new(credentials, self.app_key.clone(), Some(&self.base_url))?;
        Ok(Box::new(client))
    }
}
