//! Facility Model

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, Validator, Violation, is_email,
};

use super::BadgeTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacilityStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl FacilityStatus {
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Success,
            Self::Inactive => BadgeTone::Neutral,
            Self::Maintenance => BadgeTone::Warning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl std::str::FromStr for FacilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(format!("unknown facility status: {other}")),
        }
    }
}

/// Gym location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: FacilityStatus,
    #[serde(default)]
    pub member_count: u32,
}

impl Searchable for Facility {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
        ]
    }
}

impl Resource for Facility {
    const PATH: &'static str = "facilities";
    const NAME: &'static str = "Facility";

    type Draft = FacilityDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Facility form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: FacilityStatus,
}

impl Draft for FacilityDraft {
    type Entity = Facility;

    fn from_entity(facility: &Facility) -> Self {
        Self {
            id: Some(facility.id.clone()),
            name: facility.name.clone(),
            address: facility.address.clone(),
            city: facility.city.clone(),
            postal_code: facility.postal_code.clone(),
            country: facility.country.clone(),
            phone: facility.phone.clone(),
            email: facility.email.clone(),
            status: facility.status,
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        let email_ok = self
            .email
            .as_deref()
            .is_none_or(|e| e.trim().is_empty() || is_email(e.trim()));
        Validator::new()
            .required_text("name", &self.name, MAX_NAME_LEN)
            .required_text("address", &self.address, MAX_ADDRESS_LEN)
            .required_text("city", &self.city, MAX_NAME_LEN)
            .optional_text("postalCode", self.postal_code.as_deref(), MAX_SHORT_TEXT_LEN)
            .optional_text("phone", self.phone.as_deref(), MAX_SHORT_TEXT_LEN)
            .check(email_ok, "email", "email is not a valid email address")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_count_defaults_to_zero() {
        let json = r#"{"id":3,"name":"Södermalm","address":"Götgatan 1","city":"Stockholm","status":"Maintenance"}"#;
        let facility: Facility = serde_json::from_str(json).unwrap();
        assert_eq!(facility.member_count, 0);
        assert_eq!(facility.status.badge(), BadgeTone::Warning);
    }

    #[test]
    fn test_draft_optional_email_checked_only_when_present() {
        let mut draft = FacilityDraft {
            name: "Kungsholmen".to_string(),
            address: "Fleminggatan 2".to_string(),
            city: "Stockholm".to_string(),
            ..Default::default()
        };
        assert!(draft.validate(FormMode::Create).is_empty());

        draft.email = Some("nope".to_string());
        let violations = draft.validate(FormMode::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "email");
    }
}
