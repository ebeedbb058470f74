//! Authentication state for the two front-ends
//!
//! [`AuthContext`] owns the current session, mirrors it into the
//! [`SessionStore`] and keeps the transport's bearer token in step. The
//! dashboard and the portal differ only in their principal type and the
//! endpoints they log in against, so each gets its own `login`/`register`.

use shared::client::{
    AdminLoginRequest, AdminLoginResponse, AdminPrincipal, AdminRegistration, MemberAuthResponse,
    MemberLoginRequest, MemberPrincipal, MemberRegistration, Principal,
};

use crate::client::HttpClient;
use crate::session::{Session, SessionStore};
use crate::{ClientError, ClientResult};

/// Dashboard staff authentication
pub type AdminAuth<C> = AuthContext<C, AdminPrincipal>;

/// Member portal authentication
pub type MemberAuth<C> = AuthContext<C, MemberPrincipal>;

#[derive(Debug)]
pub struct AuthContext<C, P: Principal> {
    http: C,
    store: SessionStore<P>,
    session: Option<Session<P>>,
}

impl<C: HttpClient, P: Principal> AuthContext<C, P> {
    /// Logged-out context; call [`restore`](Self::restore) to pick up a
    /// persisted session
    pub fn new(http: C, store: SessionStore<P>) -> Self {
        Self {
            http,
            store,
            session: None,
        }
    }

    /// Load the persisted session, if any, and install its token
    pub fn restore(&mut self) -> Option<&P> {
        self.session = self.store.load();
        self.http
            .set_token(self.session.as_ref().map(|s| s.token.clone()));
        if let Some(session) = &self.session {
            tracing::info!(user = %session.principal.display_name(), "Session restored");
        }
        self.principal()
    }

    /// Drop the session locally; the backend is not told
    pub fn logout(&mut self) -> ClientResult<()> {
        if let Some(session) = self.session.take() {
            tracing::info!(user = %session.principal.display_name(), "Logged out");
        }
        self.http.set_token(None);
        self.store.clear()?;
        Ok(())
    }

    pub fn principal(&self) -> Option<&P> {
        self.session.as_ref().map(|s| &s.principal)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn establish(&mut self, token: String, principal: P) -> ClientResult<&P> {
        let session = Session { token, principal };
        self.store.save(&session)?;
        self.http.set_token(Some(session.token.clone()));
        tracing::info!(user = %session.principal.display_name(), "Logged in");
        Ok(&self.session.insert(session).principal)
    }
}

impl<C: HttpClient> AuthContext<C, AdminPrincipal> {
    /// `POST /auth/login`
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<&AdminPrincipal> {
        let request = AdminLoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: AdminLoginResponse = self
            .http
            .post("auth/login", &request)
            .await
            .inspect_err(|e| tracing::warn!(username = %request.username, error = %e, "Login failed"))?;
        self.establish(response.token, response.user)
    }

    /// `POST /auth/register`, then signed in as the new user
    pub async fn register(&mut self, form: &AdminRegistration) -> ClientResult<&AdminPrincipal> {
        let violations = form.validate();
        if !violations.is_empty() {
            return Err(ClientError::Validation(violations));
        }
        let response: AdminLoginResponse = self.http.post("auth/register", &form.to_request()).await?;
        self.establish(response.token, response.user)
    }
}

impl<C: HttpClient> AuthContext<C, MemberPrincipal> {
    /// `POST /members/login`
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&MemberPrincipal> {
        let request = MemberLoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: MemberAuthResponse = self
            .http
            .post("members/login", &request)
            .await
            .inspect_err(|e| tracing::warn!(email = %request.email, error = %e, "Login failed"))?;
        self.establish(response.token, response.member)
    }

    /// `POST /members/register`, then signed in as the new member
    pub async fn register(&mut self, form: &MemberRegistration) -> ClientResult<&MemberPrincipal> {
        let violations = form.validate();
        if !violations.is_empty() {
            return Err(ClientError::Validation(violations));
        }
        let response: MemberAuthResponse =
            self.http.post("members/register", &form.to_request()).await?;
        self.establish(response.token, response.member)
    }
}
