//! Subscription plans and member subscriptions

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, Validator, Violation};

use super::BadgeTone;

/// Subscription plan offered to members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Length of one billing period in days
    pub duration: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Searchable for SubscriptionPlan {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields.extend(self.features.iter().map(String::as_str));
        fields
    }
}

impl Resource for SubscriptionPlan {
    const PATH: &'static str = "subscriptions/plans";
    const NAME: &'static str = "Subscription plan";

    type Draft = SubscriptionPlanDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Subscription plan form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlanDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub duration: u32,
    pub features: Vec<String>,
    pub is_active: bool,
}

impl Default for SubscriptionPlanDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            price: 0.0,
            duration: 30,
            features: Vec::new(),
            is_active: true,
        }
    }
}

impl SubscriptionPlanDraft {
    /// Set features from the comma-separated form input, dropping blanks
    pub fn set_features_from_input(&mut self, input: &str) {
        self.features = split_list(input);
    }
}

/// Split a comma-separated input into trimmed, non-empty entries
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Draft for SubscriptionPlanDraft {
    type Entity = SubscriptionPlan;

    fn from_entity(plan: &SubscriptionPlan) -> Self {
        Self {
            id: Some(plan.id.clone()),
            name: plan.name.clone(),
            description: plan.description.clone(),
            price: plan.price,
            duration: plan.duration,
            features: plan.features.clone(),
            is_active: plan.is_active,
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        Validator::new()
            .required_text("name", &self.name, MAX_NAME_LEN)
            .optional_text("description", self.description.as_deref(), MAX_ADDRESS_LEN)
            .check(
                self.price.is_finite() && self.price >= 0.0,
                "price",
                "price must be zero or more",
            )
            .check(self.duration > 0, "duration", "duration must be at least one day")
            .finish()
    }
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
    Pending,
}

impl SubscriptionStatus {
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Success,
            Self::Pending => BadgeTone::Warning,
            Self::Expired => BadgeTone::Neutral,
            Self::Cancelled => BadgeTone::Danger,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
            Self::Pending => "Pending",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "pending" => Ok(Self::Pending),
            other => Err(format!("unknown subscription status: {other}")),
        }
    }
}

/// Payment state of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::Paid => BadgeTone::Success,
            Self::Pending => BadgeTone::Warning,
            Self::Failed => BadgeTone::Danger,
            Self::Refunded => BadgeTone::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// A member's subscription to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSubscription {
    pub id: EntityId,
    pub member_id: EntityId,
    pub plan_id: EntityId,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Searchable for MemberSubscription {
    fn search_fields(&self) -> Vec<&str> {
        // Only ids here; the screen joins member and plan names separately
        let mut fields = Vec::new();
        if let EntityId::Text(s) = &self.member_id {
            fields.push(s.as_str());
        }
        if let EntityId::Text(s) = &self.plan_id {
            fields.push(s.as_str());
        }
        fields
    }
}

impl Resource for MemberSubscription {
    const PATH: &'static str = "member-subscriptions";
    const NAME: &'static str = "Member subscription";

    type Draft = MemberSubscriptionDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Member subscription form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSubscriptionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub member_id: Option<EntityId>,
    pub plan_id: Option<EntityId>,
    pub status: SubscriptionStatus,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Draft for MemberSubscriptionDraft {
    type Entity = MemberSubscription;

    fn from_entity(sub: &MemberSubscription) -> Self {
        Self {
            id: Some(sub.id.clone()),
            member_id: Some(sub.member_id.clone()),
            plan_id: Some(sub.plan_id.clone()),
            status: sub.status,
            payment_status: sub.payment_status,
            start_date: sub.start_date.clone(),
            end_date: sub.end_date.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        let dates_ordered = match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        };
        Validator::new()
            .check(self.member_id.is_some(), "memberId", "a member must be selected")
            .check(self.plan_id.is_some(), "planId", "a plan must be selected")
            .check(dates_ordered, "endDate", "end date must not be before start date")
            .finish()
    }
}
