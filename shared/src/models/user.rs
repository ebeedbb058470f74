//! Admin user Model

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, Validator, Violation,
};

/// Role of a dashboard user. Role changes are not validated client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Dashboard user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str(), self.role.label()]
    }
}

impl Resource for User {
    const PATH: &'static str = "User";
    const NAME: &'static str = "User";

    type Draft = UserDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// User form. The password is only sent when filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            id: None,
            username: String::new(),
            email: String::new(),
            role: UserRole::Staff,
            is_active: true,
            password: None,
        }
    }
}

impl Draft for UserDraft {
    type Entity = User;

    fn from_entity(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            password: None,
        }
    }

    fn validate(&self, mode: FormMode) -> Vec<Violation> {
        let password = self.password.as_deref().unwrap_or("");
        let mut validator = Validator::new();
        validator
            .required_text("username", &self.username, MAX_NAME_LEN)
            .email("email", &self.email);

        match mode {
            FormMode::Create => {
                validator.check(
                    password.chars().count() >= MIN_PASSWORD_LEN,
                    "password",
                    format!("password must be at least {MIN_PASSWORD_LEN} characters"),
                );
            }
            FormMode::Edit => {
                validator.check(
                    password.is_empty() || password.chars().count() >= MIN_PASSWORD_LEN,
                    "password",
                    format!("password must be at least {MIN_PASSWORD_LEN} characters"),
                );
            }
        }
        validator
            .check(
                password.len() <= MAX_PASSWORD_LEN,
                "password",
                "password is too long",
            )
            .finish()
    }
}
