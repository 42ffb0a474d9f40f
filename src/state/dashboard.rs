//! Back-office dashboard.

use crate::client::ApiClient;
use crate::models::DashboardStats;

use super::Loadable;

/// Dashboard counters. Each one loads independently, so a failing query
/// leaves the others displayed.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub total_users: Loadable<u64>,
    pub listings: Loadable<u64>,
    pub merchant_listings: Loadable<u64>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the three counters concurrently.
    pub async fn load(&mut self, client: &ApiClient) -> &mut Self {
        let users = client.users();
        let listings = client.listings();
        let merchant_listings = client.merchant_listings();

        futures::join!(
            self.total_users.load(users.count()),
            self.listings
                .load(async { listings.list().await.map(|l| l.len() as u64) }),
            self.merchant_listings
                .load(async { merchant_listings.list().await.map(|l| l.len() as u64) }),
        );

        let failures = self.errors().len();
        if failures > 0 {
            log::warn!("Dashboard loaded with {} failed counter(s)", failures);
        }
        self
    }

    pub fn is_loading(&self) -> bool {
        self.total_users.loading || self.listings.loading || self.merchant_listings.loading
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_users: self.total_users.data,
            listings: self.listings.data,
            merchant_listings: self.merchant_listings.data,
        }
    }

    /// Failed counters with their messages.
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        [
            ("users", &self.total_users),
            ("listings", &self.listings),
            ("merchant listings", &self.merchant_listings),
        ]
        .into_iter()
        .filter_map(|(name, counter)| counter.error().map(|e| (name, e)))
        .collect()
    }
}
