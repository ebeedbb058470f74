//! Transport module
//!
//! The `HttpClient` trait is the seam every service is generic over. The
//! network client talks to the real backend; the oneshot client drives an
//! in-process axum router with identical semantics.

pub mod http;
pub mod http_oneshot;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
