//! Persisted session state
//!
//! A session is a bearer token plus the JSON-serialized principal, stored
//! under the key pair the principal type names. Admin and member sessions
//! can share one storage directory without touching each other's keys.

mod storage;

use std::marker::PhantomData;
use std::path::Path;

use shared::client::Principal;
use thiserror::Error;

pub use storage::LocalStorage;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logged-in state: who, and the token to prove it
#[derive(Debug, Clone, PartialEq)]
pub struct Session<P> {
    pub token: String,
    pub principal: P,
}

/// Typed load/save/clear over the storage keys of `P`
#[derive(Debug, Clone)]
pub struct SessionStore<P: Principal> {
    storage: LocalStorage,
    _principal: PhantomData<fn() -> P>,
}

impl<P: Principal> SessionStore<P> {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            _principal: PhantomData,
        }
    }

    /// Store backed by `{dir}/storage.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(LocalStorage::new(dir.as_ref()))
    }

    /// Read the stored session.
    ///
    /// Anything incomplete or unparsable counts as logged out and both keys
    /// are cleared, so the next load starts clean.
    pub fn load(&self) -> Option<Session<P>> {
        let token = self.storage.get(P::TOKEN_KEY);
        let data = self.storage.get(P::DATA_KEY);

        let (token, data) = match (token, data) {
            (None, None) => return None,
            (Some(token), Some(data)) if !token.trim().is_empty() => (token, data),
            _ => {
                tracing::info!(key = P::TOKEN_KEY, "Incomplete stored session, clearing");
                self.clear_quietly();
                return None;
            }
        };

        match serde_json::from_str::<P>(&data) {
            Ok(principal) => {
                tracing::debug!(user = %principal.display_name(), "Loaded stored session");
                Some(Session { token, principal })
            }
            Err(e) => {
                tracing::info!(key = P::DATA_KEY, error = %e, "Stored principal is corrupt, clearing");
                self.clear_quietly();
                None
            }
        }
    }

    pub fn save(&self, session: &Session<P>) -> Result<(), SessionError> {
        let data = serde_json::to_string(&session.principal)?;
        self.storage.set_many(&[
            (P::TOKEN_KEY, session.token.clone()),
            (P::DATA_KEY, data),
        ])?;
        tracing::debug!(user = %session.principal.display_name(), "Session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove(&[P::TOKEN_KEY, P::DATA_KEY])?;
        tracing::debug!(key = P::TOKEN_KEY, "Session cleared");
        Ok(())
    }

    fn clear_quietly(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EntityId;
    use shared::client::{AdminPrincipal, MemberPrincipal};
    use shared::models::UserRole;
    use tempfile::TempDir;

    fn admin_session() -> Session<AdminPrincipal> {
        Session {
            token: "admin-token".to_string(),
            principal: AdminPrincipal {
                id: EntityId::from(1),
                username: "admin".to_string(),
                email: None,
                role: UserRole::Admin,
            },
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::<AdminPrincipal>::in_dir(dir.path());

        assert!(store.load().is_none());
        store.save(&admin_session()).unwrap();
        assert_eq!(store.load(), Some(admin_session()));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_principal_is_logged_out_and_cleared() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.set("auth_token", "abc").unwrap();
        storage.set("auth_user", "{broken").unwrap();

        let store = SessionStore::<AdminPrincipal>::new(storage.clone());
        assert!(store.load().is_none());
        assert!(storage.get("auth_token").is_none());
        assert!(storage.get("auth_user").is_none());
    }

    #[test]
    fn test_token_without_principal_is_cleared() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.set("halsoprofilen_member_token", "abc").unwrap();

        let store = SessionStore::<MemberPrincipal>::new(storage.clone());
        assert!(store.load().is_none());
        assert!(storage.get("halsoprofilen_member_token").is_none());
    }

    #[test]
    fn test_roles_do_not_interfere() {
        let dir = TempDir::new().unwrap();
        let admin = SessionStore::<AdminPrincipal>::in_dir(dir.path());
        let member = SessionStore::<MemberPrincipal>::in_dir(dir.path());

        admin.save(&admin_session()).unwrap();
        member
            .save(&Session {
                token: "member-token".to_string(),
                principal: MemberPrincipal {
                    id: EntityId::from("m1"),
                    name: "Anna".to_string(),
                    email: "anna@example.se".to_string(),
                    phone: None,
                },
            })
            .unwrap();

        member.clear().unwrap();
        assert!(member.load().is_none());
        assert_eq!(admin.load(), Some(admin_session()));
    }
}
