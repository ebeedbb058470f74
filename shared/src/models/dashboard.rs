//! Dashboard aggregates (`/dashboard/stats`)

use serde::{Deserialize, Serialize};

use super::{BlogPost, Member};

/// Counts and recent items for the admin landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_members: u64,
    pub active_members: u64,
    pub total_facilities: u64,
    pub total_classes: u64,
    pub active_subscriptions: u64,
    pub recent_members: Vec<Member>,
    pub recent_posts: Vec<BlogPost>,
}
