// src/services/users.rs

//! User administration and the signed-in user's profile.

use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::ApiResult;
use crate::models::{Role, UpdateUserRequest, User, UserStatus};

use super::item;

/// Endpoints under `/utilisateurs`.
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All users, or only those with `role`.
    pub async fn list(&self, role: Option<Role>) -> ApiResult<Vec<User>> {
        match role {
            Some(role) => {
                let path = format!("{}/role/{}", endpoints::USERS, role.as_str());
                self.client.get(&path).await
            }
            None => self.client.get(endpoints::USERS).await,
        }
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.client.get(&item(endpoints::USERS, id)).await
    }

    pub async fn update(&self, id: i64, changes: &UpdateUserRequest) -> ApiResult<User> {
        self.client.put(&item(endpoints::USERS, id), changes).await
    }

    pub async fn suspend(&self, id: i64) -> ApiResult<()> {
        self.set_status(id, UserStatus::Suspended).await
    }

    pub async fn activate(&self, id: i64) -> ApiResult<()> {
        self.set_status(id, UserStatus::Validated).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let _: IgnoredAny = self.client.delete(&item(endpoints::USERS, id)).await?;
        log::info!("Deleted user {}", id);
        Ok(())
    }

    /// Total number of accounts.
    pub async fn count(&self) -> ApiResult<u64> {
        self.client.get(&item(endpoints::USERS, "count")).await
    }

    /// Profile of the signed-in user.
    pub async fn profile(&self) -> ApiResult<User> {
        self.client.get(&item(endpoints::USERS, "profile")).await
    }

    pub async fn update_profile(&self, changes: &UpdateUserRequest) -> ApiResult<User> {
        self.client.put(&item(endpoints::USERS, "profile"), changes).await
    }

    async fn set_status(&self, id: i64, status: UserStatus) -> ApiResult<()> {
        let _: IgnoredAny = self
            .client
            .put(&item(endpoints::USERS, id), &UpdateUserRequest::status(status))
            .await?;
        log::info!("User {} is now {}", id, status.label());
        Ok(())
    }
}
