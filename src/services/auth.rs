// src/services/auth.rs

//! Sign-in, sign-up and session lifecycle.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::constants::{endpoints, messages};
use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, TokenCheck, User};

#[derive(Debug, Deserialize)]
struct EmailAvailability {
    #[serde(default)]
    available: bool,
}

/// Authentication endpoints under `/auth` and `/inscriptions`.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and persist the token and user in the session store.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let auth = self.authenticate(email, password).await?;
        self.persist(&auth).await?;
        Ok(auth)
    }

    /// Back-office sign-in. Non-admin accounts are rejected and nothing is
    /// persisted for them.
    pub async fn login_admin(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let auth = self.authenticate(email, password).await?;
        if !auth.user.is_admin() {
            log::warn!("Back-office sign-in refused for {} ({})", auth.user.email, auth.user.role);
            return Err(ApiError::http(
                ErrorKind::Forbidden,
                403,
                messages::ADMIN_ONLY,
            ));
        }
        self.persist(&auth).await?;
        Ok(auth)
    }

    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let user: User = self.client.post(endpoints::REGISTRATIONS, request).await?;
        log::info!("Registered {} as {}", user.email, user.role);
        Ok(user)
    }

    /// Ask the backend whether the stored token is still valid.
    pub async fn verify_token(&self) -> ApiResult<TokenCheck> {
        let path = format!("{}/verify-token", endpoints::AUTH);
        self.client.post_query(&path, &[]).await
    }

    /// Forget the local session. The backend keeps no session state.
    pub async fn logout(&self) -> ApiResult<()> {
        self.client
            .store()
            .clear()
            .await
            .map_err(ApiError::unexpected)?;
        log::info!("Signed out");
        Ok(())
    }

    /// Whether an email address is free for sign-up. Any failure reads as
    /// "not available".
    pub async fn check_email(&self, email: &str) -> bool {
        let path = format!("{}/check-email", endpoints::AUTH);
        let query = [("email", email.to_string())];
        match self
            .client
            .get_query::<EmailAvailability>(&path, &query)
            .await
        {
            Ok(answer) => answer.available,
            Err(e) => {
                log::debug!("Email availability check failed: {}", e);
                false
            }
        }
    }

    /// User saved by the last sign-in, if any.
    pub async fn current_user(&self) -> ApiResult<Option<User>> {
        self.client
            .store()
            .current_user()
            .await
            .map_err(ApiError::unexpected)
    }

    async fn authenticate(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let path = format!("{}/login", endpoints::AUTH);
        self.client.post(&path, &request).await
    }

    async fn persist(&self, auth: &AuthResponse) -> ApiResult<()> {
        self.client
            .store()
            .save_auth(auth)
            .await
            .map_err(ApiError::unexpected)?;
        log::info!("Signed in as {} ({})", auth.user.email, auth.user.role);
        Ok(())
    }
}
