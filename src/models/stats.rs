//! Back-office dashboard counters.

use serde::Serialize;

/// Counters shown on the dashboard. A counter is `None` when its query
/// failed; the others are still reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_users: Option<u64>,
    pub listings: Option<u64>,
    pub merchant_listings: Option<u64>,
}

impl DashboardStats {
    pub fn is_complete(&self) -> bool {
        self.total_users.is_some() && self.listings.is_some() && self.merchant_listings.is_some()
    }
}
