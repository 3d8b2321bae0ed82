//! # HTTP Client
//!
//! Thin wrapper over `reqwest` that issues exactly one request per call.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get / post / delete (path)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base_url + path ──► send ──┬── transport error ──► warn! ──► Err      │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                        status 2xx? ── no ──► warn! ──► Err(Status)     │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                        parse JSON ── fail ─► warn! ──► Err(Decode)     │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                        Ok(body)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty 2xx body decodes as JSON `null`. The remote API answers unknown
//! product and user ids this way, so typed callers ask for `Option<T>`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

/// Client for the remote store API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from API settings.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient { http, base_url })
    }

    /// Client for an origin with default settings (mock servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> ClientResult<Self> {
        ApiClient::new(&ApiSettings {
            base_url: base_url.into(),
            ..ApiSettings::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    // =========================================================================
    // Raw JSON
    // =========================================================================

    /// GET `path`, returning the parsed body unchanged.
    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// POST `body` as JSON to `path`, returning the parsed body unchanged.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// DELETE `path`, returning the parsed body unchanged.
    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    // =========================================================================
    // Typed JSON
    // =========================================================================

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path).map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Invalid request URL");
            e
        })?;

        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = ClientError::from(e);
            warn!(method = %method, url = %url, error = %err, "Request failed");
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = ClientError::from(e);
            warn!(method = %method, url = %url, error = %err, "Failed to read response body");
            err
        })?;

        debug!(method = %method, url = %url, status = status.as_u16(), bytes = text.len(), "Response received");

        if !status.is_success() {
            warn!(method = %method, url = %url, status = status.as_u16(), body = %text, "Server returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(payload).map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "Response is not the expected JSON");
            ClientError::Decode(format!("{} {}: {}", method, path, e))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
