//! In-process HTTP client
//!
//! Calls an axum [`Router`] directly through tower's `oneshot`, with the same
//! prefix, casing and error handling as [`NetworkHttpClient`]. Used to run
//! the clients against an in-memory backend, without sockets.
//!
//! [`NetworkHttpClient`]: super::NetworkHttpClient

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::BodyCasing;
use tower::ServiceExt;

use crate::config::{ClientConfig, normalize_prefix};
use crate::{ClientError, ClientResult};

use super::http::{HttpClient, TokenSlot, decode_response, encode_body, join_path};

/// Oneshot HTTP client (in-memory calls)
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use halso_client::{ClientConfig, OneshotHttpClient};
///
/// let router: Router = fake_backend();
/// let client = OneshotHttpClient::new(router, &ClientConfig::admin("http://unused"));
/// let members: Vec<Member> = client.get("members").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    prefix: String,
    casing: BodyCasing,
    token: TokenSlot,
}

impl OneshotHttpClient {
    /// Wrap a fully built router (`with_state` already applied)
    pub fn new(router: Router, config: &ClientConfig) -> Self {
        Self {
            router,
            prefix: config.normalized_prefix(),
            casing: config.body_casing,
            token: TokenSlot::new(config.token.clone()),
        }
    }

    /// Plain camelCase client without prefix
    pub fn plain(router: Router) -> Self {
        Self {
            router,
            prefix: normalize_prefix(""),
            casing: BodyCasing::Camel,
            token: TokenSlot::default(),
        }
    }

    fn build_request(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = join_path(&self.prefix, path);
        tracing::debug!(%method, %uri, "Dispatching in-process request");

        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = self.token.bearer() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        decode_response(status, &body_bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::GET, path, None)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = encode_body(self.casing, body)?;
        let request = self.build_request(http::Method::POST, path, Some(bytes))?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = encode_body(self.casing, body)?;
        let request = self.build_request(http::Method::PUT, path, Some(bytes))?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::DELETE, path, None)?;
        self.execute(request).await
    }

    fn set_token(&self, token: Option<String>) {
        self.token.set(token);
    }

    fn token(&self) -> Option<String> {
        self.token.get()
    }
}
