//! Auth DTOs shared by the admin and member clients
//!
//! The two front-ends authenticate different principals against different
//! endpoints. Each principal type carries the storage keys its session is
//! persisted under, so the two never read each other's session.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::UserRole;
use crate::types::EntityId;
use crate::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MIN_PASSWORD_LEN, Validator, Violation,
};

/// An authenticated party held in session state
pub trait Principal: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key of the bearer token
    const TOKEN_KEY: &'static str;
    /// Storage key of the JSON-serialized principal
    const DATA_KEY: &'static str;

    fn display_name(&self) -> &str;
}

// =============================================================================
// Admin dashboard
// =============================================================================

/// Logged-in dashboard user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPrincipal {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
}

impl Principal for AdminPrincipal {
    const TOKEN_KEY: &'static str = "auth_token";
    const DATA_KEY: &'static str = "auth_user";

    fn display_name(&self) -> &str {
        &self.username
    }
}

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `{ user, token }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub user: AdminPrincipal,
    pub token: String,
}

/// Admin sign-up form, checked before anything is sent
#[derive(Debug, Clone, Default)]
pub struct AdminRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AdminRegistration {
    pub fn validate(&self) -> Vec<Violation> {
        let mut validator = Validator::new();
        validator
            .required_text("username", &self.username, MAX_NAME_LEN)
            .email("email", &self.email);
        check_passwords(&mut validator, &self.password, &self.confirm_password);
        validator.finish()
    }

    pub fn to_request(&self) -> AdminRegisterRequest {
        AdminRegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

// =============================================================================
// Member portal
// =============================================================================

/// Logged-in gym member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPrincipal {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Principal for MemberPrincipal {
    const TOKEN_KEY: &'static str = "halsoprofilen_member_token";
    const DATA_KEY: &'static str = "halsoprofilen_member_data";

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// `POST /members/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /members/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// `{ member, token }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAuthResponse {
    pub member: MemberPrincipal,
    pub token: String,
}

/// Member sign-up form, checked before anything is sent
#[derive(Debug, Clone, Default)]
pub struct MemberRegistration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl MemberRegistration {
    pub fn validate(&self) -> Vec<Violation> {
        let mut validator = Validator::new();
        validator
            .required_text("name", &self.name, MAX_NAME_LEN)
            .email("email", &self.email)
            .optional_text("phone", self.phone.as_deref(), MAX_SHORT_TEXT_LEN);
        check_passwords(&mut validator, &self.password, &self.confirm_password);
        validator.finish()
    }

    pub fn to_request(&self) -> MemberRegisterRequest {
        MemberRegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            password: self.password.clone(),
        }
    }
}

fn check_passwords(validator: &mut Validator, password: &str, confirm: &str) {
    let len = password.chars().count();
    validator
        .check(
            len >= MIN_PASSWORD_LEN,
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        )
        .check(len <= MAX_PASSWORD_LEN, "password", "password is too long")
        .check(password == confirm, "confirmPassword", "passwords do not match");
}
