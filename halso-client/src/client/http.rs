//! HTTP transport over the network
//!
//! One attempt per call: no retries and no backoff. A timeout is applied
//! only when the configuration asks for one.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::BodyCasing;
use shared::response::extract_error_message;

use crate::config::ClientConfig;
use crate::{ClientError, ClientResult};

/// Transport seam shared by the network client and the in-process client
///
/// Paths are relative to the API prefix (`members`, `classes/3`). Bodies go
/// through the configured [`BodyCasing`] before they are sent. An empty
/// response body decodes as JSON `null`, so `Option<T>` and
/// [`serde::de::IgnoredAny`] work for `204 No Content`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;

    /// Install or drop the bearer token for subsequent requests
    fn set_token(&self, token: Option<String>);
    fn token(&self) -> Option<String>;
}

/// Bearer token shared between clones of one transport
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenSlot(Arc<RwLock<Option<String>>>);

impl TokenSlot {
    pub(crate) fn new(token: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(token)))
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set(&self, token: Option<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.get().map(|t| format!("Bearer {}", t))
    }
}

/// Join prefix and resource path into a request path starting with `/`
pub(crate) fn join_path(prefix: &str, path: &str) -> String {
    format!("{}/{}", prefix, path.trim_start_matches('/'))
}

/// Serialize a request body and apply the key casing
pub(crate) fn encode_body<B: Serialize>(casing: BodyCasing, body: &B) -> ClientResult<Vec<u8>> {
    let value = casing.apply(serde_json::to_value(body)?);
    Ok(serde_json::to_vec(&value)?)
}

/// Turn a status + raw body into a decoded value or a client error
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: http::StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    if !status.is_success() {
        let text = String::from_utf8_lossy(body);
        let fallback = status.canonical_reason().unwrap_or("Request failed");
        let message = extract_error_message(&text, fallback);
        tracing::warn!(status = status.as_u16(), %message, "Request failed");
        return Err(ClientError::from_status(status, message));
    }

    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Network HTTP client (reqwest)
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    prefix: String,
    casing: BodyCasing,
    token: TokenSlot,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            prefix: config.normalized_prefix(),
            casing: config.body_casing,
            token: TokenSlot::new(config.token.clone()),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, join_path(&self.prefix, path))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Sending request");

        let mut req = self.client.request(method, &url);
        if let Some(auth) = self.token.bearer() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(bytes) = body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        let response = req.send().await.inspect_err(|e| {
            tracing::warn!(%url, error = %e, "Request could not be sent");
        })?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_response(status, &bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(reqwest::Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = encode_body(self.casing, body)?;
        self.execute(reqwest::Method::POST, path, Some(bytes)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = encode_body(self.casing, body)?;
        self.execute(reqwest::Method::PUT, path, Some(bytes)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(reqwest::Method::DELETE, path, None).await
    }

    fn set_token(&self, token: Option<String>) {
        self.token.set(token);
    }

    fn token(&self) -> Option<String> {
        self.token.get()
    }
}
