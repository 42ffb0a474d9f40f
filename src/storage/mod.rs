//! Session storage: the client's credential provider.
//!
//! A session is two string keys:
//!
//! ```text
//! authToken   # bearer token issued by /auth/login
//! user        # JSON-serialized current user
//! ```
//!
//! The HTTP client reads the token on every request and clears both keys
//! when the backend answers 401. Nothing else is persisted.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::constants::keys;
use crate::error::Result;
use crate::models::{AuthResponse, User};

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Key/value store backing the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a key, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Current bearer token. Blank values count as absent.
    async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .get(keys::AUTH_TOKEN)
            .await?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Current user, if one was saved and still parses.
    async fn current_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.get(keys::USER).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist a successful login.
    async fn save_auth(&self, auth: &AuthResponse) -> Result<()> {
        let user = serde_json::to_string(&auth.user)?;
        self.set(keys::AUTH_TOKEN, &auth.token).await?;
        self.set(keys::USER, &user).await
    }

    /// Drop the token and the user.
    async fn clear(&self) -> Result<()> {
        self.remove(keys::AUTH_TOKEN).await?;
        self.remove(keys::USER).await
    }
}
