//! Member → plan lookup
//!
//! Subscriptions and plans come from two separate collections. The index
//! joins them once per load instead of scanning both lists per member.

use std::collections::HashMap;

use shared::EntityId;
use shared::models::{MemberSubscription, SubscriptionPlan, SubscriptionStatus};

/// Label shown when a member has no usable subscription
pub const NO_ACTIVE_SUBSCRIPTION: &str = "No active subscription";

/// What the member detail view shows under "Subscription"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MemberPlanView<'a> {
    Active {
        plan: &'a SubscriptionPlan,
        subscription: &'a MemberSubscription,
    },
    NoActiveSubscription,
}

impl MemberPlanView<'_> {
    pub fn label(&self) -> &str {
        match self {
            Self::Active { plan, .. } => &plan.name,
            Self::NoActiveSubscription => NO_ACTIVE_SUBSCRIPTION,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionIndex {
    plans: HashMap<EntityId, SubscriptionPlan>,
    by_member: HashMap<EntityId, MemberSubscription>,
}

impl SubscriptionIndex {
    /// Index one subscription per member: an `Active` one if there is any,
    /// otherwise the last one listed.
    pub fn build(subscriptions: &[MemberSubscription], plans: &[SubscriptionPlan]) -> Self {
        let plans = plans
            .iter()
            .map(|plan| (plan.id.clone(), plan.clone()))
            .collect();

        let mut by_member: HashMap<EntityId, MemberSubscription> = HashMap::new();
        for subscription in subscriptions {
            let keep_current = by_member.get(&subscription.member_id).is_some_and(|current| {
                current.status == SubscriptionStatus::Active
                    && subscription.status != SubscriptionStatus::Active
            });
            if !keep_current {
                by_member.insert(subscription.member_id.clone(), subscription.clone());
            }
        }

        tracing::debug!(members = by_member.len(), "Built subscription index");
        Self { plans, by_member }
    }

    pub fn plan(&self, plan_id: &EntityId) -> Option<&SubscriptionPlan> {
        self.plans.get(plan_id)
    }

    pub fn subscription_for(&self, member_id: &EntityId) -> Option<&MemberSubscription> {
        self.by_member.get(member_id)
    }

    /// Only an `Active` subscription to a known plan shows its plan name
    pub fn plan_for_member(&self, member_id: &EntityId) -> MemberPlanView<'_> {
        self.subscription_for(member_id)
            .filter(|subscription| subscription.status == SubscriptionStatus::Active)
            .and_then(|subscription| {
                self.plan(&subscription.plan_id)
                    .map(|plan| MemberPlanView::Active { plan, subscription })
            })
            .unwrap_or(MemberPlanView::NoActiveSubscription)
    }
}
