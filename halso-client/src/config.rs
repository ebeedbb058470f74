//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HALSO_API_URL | http://localhost:5000 | Backend base URL |
//! | HALSO_API_PREFIX | `/api` (admin), empty (member) | Path prefix before every resource |
//! | HALSO_BODY_CASING | `pascal` (admin), `camel` (member) | Key casing of request bodies |
//! | HALSO_TIMEOUT_SECS | unset (no timeout) | Per-request timeout; `0` means none |
//! | HALSO_SESSION_DIR | .halsoprofilen | Directory holding the persisted session |

use std::path::PathBuf;

use shared::BodyCasing;

use crate::client::NetworkHttpClient;
use crate::error::ClientResult;

/// Which front-end the client acts as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientFlavor {
    /// Administrative dashboard: `/api` prefix, PascalCase bodies
    Admin,
    /// Member portal: no prefix, camelCase bodies
    #[default]
    Member,
}

impl ClientFlavor {
    pub fn default_prefix(self) -> &'static str {
        match self {
            Self::Admin => "/api",
            Self::Member => "",
        }
    }

    pub fn default_casing(self) -> BodyCasing {
        match self {
            Self::Admin => BodyCasing::Pascal,
            Self::Member => BodyCasing::Camel,
        }
    }
}

/// Client configuration for connecting to the backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    pub flavor: ClientFlavor,

    /// Prefix inserted between base URL and resource path
    pub api_prefix: String,

    pub body_casing: BodyCasing,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout: Option<u64>,

    /// Where the session store keeps its file
    pub session_dir: PathBuf,

    /// Bearer token to start with
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with the conventions of `flavor`
    pub fn new(base_url: impl Into<String>, flavor: ClientFlavor) -> Self {
        Self {
            base_url: base_url.into(),
            flavor,
            api_prefix: flavor.default_prefix().to_string(),
            body_casing: flavor.default_casing(),
            timeout: None,
            session_dir: PathBuf::from(".halsoprofilen"),
            token: None,
        }
    }

    /// Admin dashboard conventions
    pub fn admin(base_url: impl Into<String>) -> Self {
        Self::new(base_url, ClientFlavor::Admin)
    }

    /// Member portal conventions
    pub fn member(base_url: impl Into<String>) -> Self {
        Self::new(base_url, ClientFlavor::Member)
    }

    /// Load from environment variables, falling back to the flavor defaults
    pub fn from_env(flavor: ClientFlavor) -> Self {
        let mut config = Self::new(
            std::env::var("HALSO_API_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
            flavor,
        );
        if let Ok(prefix) = std::env::var("HALSO_API_PREFIX") {
            config.api_prefix = prefix;
        }
        if let Ok(value) = std::env::var("HALSO_BODY_CASING") {
            match value.parse::<BodyCasing>() {
                Ok(casing) => config.body_casing = casing,
                Err(e) => tracing::warn!(%value, error = %e, "Ignoring HALSO_BODY_CASING"),
            }
        }
        if let Ok(value) = std::env::var("HALSO_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&value);
        }
        if let Ok(dir) = std::env::var("HALSO_SESSION_DIR") {
            config.session_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the path prefix
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the request body casing
    pub fn with_body_casing(mut self, casing: BodyCasing) -> Self {
        self.body_casing = casing;
        self
    }

    /// Set the request timeout; `0` disables it
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = (seconds > 0).then_some(seconds);
        self
    }

    /// Set the session directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Normalized prefix: leading slash, no trailing slash, or empty
    pub fn normalized_prefix(&self) -> String {
        normalize_prefix(&self.api_prefix)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

/// Whole seconds; `0` means no timeout, anything unparsable is ignored
fn parse_timeout(value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(seconds) => Some(seconds),
        Err(e) => {
            tracing::warn!(%value, error = %e, "Ignoring HALSO_TIMEOUT_SECS");
            None
        }
    }
}

pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::member("http://localhost:5000")
    }
}
