//! Backend API client implementation

use crate::error::{BackendError, Result};
use crate::models::QueryResult;
use metriq_core::{BackendConfig, CompiledQuery};
use reqwest::{header, Client};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Client for the time-series query API
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    api_key: Secret<String>,
    app_key: Secret<String>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("app_key", &"[REDACTED]")
            .finish()
    }
}

/// Builder for creating a BackendClient
#[derive(Default)]
pub struct BackendClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    app_key: Option<String>,
    timeout: Option<Duration>,
}

impl BackendClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Per-request timeout; exceeding it yields [`BackendError::Timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<BackendClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| "https://api.datadoghq.com".to_string());
        let base_url = Url::parse(&base_url)?;

        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BackendError::Config("missing backend API key".to_string()))?;
        let app_key = self
            .app_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BackendError::Config("missing backend application key".to_string()))?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(BackendError::Http)?;

        Ok(BackendClient {
            http,
            base_url,
            api_key: Secret::new(api_key),
            app_key: Secret::new(app_key),
        })
    }
}

impl BackendClient {
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder::new()
    }

    /// Builds a client from the application's backend configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::builder()
            .base_url(config.base_url.clone())
            .api_key(config.api_key.clone())
            .app_key(config.app_key.clone())
            .timeout(config.timeout())
            .build()
    }

    /// Dispatches a compiled query.
    ///
    /// Non-2xx responses surface as [`BackendError::Api`] carrying the raw
    /// body; timeouts surface as [`BackendError::Timeout`], distinct from
    /// other transport failures.
    #[instrument(skip(self), fields(query = %compiled.query))]
    pub async fn query(&self, compiled: &CompiledQuery) -> Result<QueryResult> {
        let mut url = self.base_url.join("api/v1/query")?;
        url.query_pairs_mut()
            .append_pair("from", &compiled.from.to_string())
            .append_pair("to", &compiled.to.to_string())
            .append_pair("query", &compiled.query);

        debug!(from = compiled.from, to = compiled.to, "querying backend");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(APP_KEY_HEADER, self.app_key.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
