//! Screen state shared by the dashboard and the portal

pub mod form;
pub mod list;
pub mod toast;

pub use form::FormController;
pub use list::{ListView, LoadState, Upsert};
pub use toast::{Toast, ToastLevel, Toaster};
