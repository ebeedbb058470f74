//! Data models
//!
//! Flat records as the backend returns them (camelCase JSON). No
//! cross-entity integrity is enforced here; joins happen in the client.

pub mod blog_post;
pub mod dashboard;
pub mod facility;
pub mod gym_class;
pub mod member;
pub mod subscription;
pub mod user;

// Re-exports
pub use blog_post::*;
pub use dashboard::*;
pub use facility::*;
pub use gym_class::*;
pub use member::*;
pub use subscription::*;
pub use user::*;

/// Badge color family for a status value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
    Neutral,
}
