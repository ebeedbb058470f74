//! Member Model

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, Validator, Violation};

use super::BadgeTone;

/// Membership status (drives the badge color only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MembershipStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl MembershipStatus {
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Success,
            Self::Inactive => BadgeTone::Neutral,
            Self::Suspended => BadgeTone::Danger,
            Self::Pending => BadgeTone::Warning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
            Self::Pending => "Pending",
        }
    }
}

impl std::str::FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            "pending" => Ok(Self::Pending),
            other => Err(format!("unknown membership status: {other}")),
        }
    }
}

/// Gym member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub membership_status: MembershipStatus,
    /// ISO-8601 date as stored by the backend
    pub join_date: String,
    #[serde(default)]
    pub facility_id: Option<EntityId>,
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        if let Some(phone) = &self.phone {
            fields.push(phone);
        }
        fields
    }
}

impl Resource for Member {
    const PATH: &'static str = "members";
    const NAME: &'static str = "Member";

    type Draft = MemberDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Member form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub membership_status: MembershipStatus,
    pub join_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<EntityId>,
}

impl Draft for MemberDraft {
    type Entity = Member;

    fn from_entity(member: &Member) -> Self {
        Self {
            id: Some(member.id.clone()),
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            membership_status: member.membership_status,
            join_date: member.join_date.clone(),
            facility_id: member.facility_id.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        Validator::new()
            .required_text("name", &self.name, MAX_NAME_LEN)
            .email("email", &self.email)
            .optional_text("phone", self.phone.as_deref(), MAX_SHORT_TEXT_LEN)
            .required_text("joinDate", &self.join_date, MAX_SHORT_TEXT_LEN)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            id: EntityId::from("m1"),
            name: "Anna Lind".to_string(),
            email: "anna@example.se".to_string(),
            phone: Some("070-123 45 67".to_string()),
            membership_status: MembershipStatus::Active,
            join_date: "2024-01-15".to_string(),
            facility_id: None,
        }
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "m1",
            "name": "Anna Lind",
            "email": "anna@example.se",
            "membershipStatus": "Suspended",
            "joinDate": "2024-01-15"
        }"#;
        let parsed: Member = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.membership_status, MembershipStatus::Suspended);
        assert!(parsed.phone.is_none());
    }

    #[test]
    fn test_search_matches_name_email_phone() {
        let m = member();
        assert!(m.matches_search("lind"));
        assert!(m.matches_search("EXAMPLE.SE"));
        assert!(m.matches_search("123 45"));
        assert!(m.matches_search("  "));
        assert!(!m.matches_search("erik"));
    }

    #[test]
    fn test_draft_requires_name_and_email() {
        let draft = MemberDraft {
            join_date: "2024-01-15".to_string(),
            ..Default::default()
        };
        let violations = draft.validate(FormMode::Create);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "email"]);

        let ok = MemberDraft::from_entity(&member());
        assert!(ok.validate(FormMode::Edit).is_empty());
    }
}
