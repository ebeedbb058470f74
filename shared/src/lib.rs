//! Shared types for the Hälsoprofilen clients
//!
//! Entity models, form drafts with their validators, auth DTOs and the
//! wire conventions (body casing, error bodies) used by both the admin
//! dashboard client and the member portal client.

pub mod casing;
pub mod client;
pub mod models;
pub mod resource;
pub mod response;
pub mod types;
pub mod util;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use casing::BodyCasing;
pub use resource::{Draft, FormMode, Resource, Searchable};
pub use types::EntityId;
pub use validation::Violation;
