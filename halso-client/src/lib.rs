//! Hälsoprofilen client - typed access to the gym backend
//!
//! Two front-ends share this crate: the administrative dashboard
//! ([`AdminClient`]) and the member portal ([`MemberPortal`]). Both talk to
//! the same REST backend through an [`HttpClient`] transport, either over
//! the network ([`NetworkHttpClient`]) or in-process against an axum router
//! ([`OneshotHttpClient`]).

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod portal;
pub mod schedule;
pub mod services;
pub mod session;
pub mod state;

pub use admin::AdminClient;
pub use auth::{AdminAuth, AuthContext, MemberAuth};
pub use client::{HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use config::{ClientConfig, ClientFlavor};
pub use error::{ClientError, ClientResult};
pub use lookup::{MemberPlanView, SubscriptionIndex};
pub use portal::MemberPortal;
pub use schedule::WeeklySchedule;
pub use services::{DashboardService, ResourceService};
pub use session::{LocalStorage, Session, SessionError, SessionStore};
pub use state::{FormController, ListView, LoadState, Toast, ToastLevel, Toaster};

// Re-export shared types for convenience
pub use shared::client::{AdminPrincipal, AdminRegistration, MemberPrincipal, MemberRegistration};
pub use shared::{Draft, EntityId, FormMode, Resource};
