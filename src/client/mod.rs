//! HTTP client wrapper for the EcoDeli backend.
//!
//! Every call goes through [`ApiClient::send`]:
//!
//! - the path is joined onto the configured base URL;
//! - the bearer token, when the session store has one, becomes the
//!   `Authorization` header;
//! - a 2xx body is parsed into the caller's type as-is;
//! - anything else is classified into an [`ApiError`]. A 401 also clears the
//!   session and sends the navigator to the login route.
//!
//! There are no retries: a failed call surfaces immediately.

mod classify;
mod navigator;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::LOGIN_PATH;
use crate::error::{ApiError, ApiResult, Result};
use crate::models::ApiConfig;
use crate::services::{
    AffiliationService, AuthService, BookingService, ContractService, DeliveryService,
    DocumentService, ListingService, MerchantListingService, UserService, WarehouseService,
};
use crate::storage::SessionStore;
use crate::utils::{self, http};

pub use classify::{classify_status, classify_transport};
pub use navigator::{Navigator, NoopNavigator};

/// Query string pairs.
pub type Query<'a> = &'a [(&'a str, String)];

/// Client for the backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build a client. The session store is the only source of credentials.
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Ok(Self {
            http: http::create_async_client(config)?,
            base_url: utils::base_url(&config.base_url)?,
            store,
            navigator,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    // --- Resource services ---

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn listings(&self) -> ListingService<'_> {
        ListingService::new(self)
    }

    pub fn merchant_listings(&self) -> MerchantListingService<'_> {
        MerchantListingService::new(self)
    }

    pub fn contracts(&self) -> ContractService<'_> {
        ContractService::new(self)
    }

    pub fn deliveries(&self) -> DeliveryService<'_> {
        DeliveryService::new(self)
    }

    pub fn warehouses(&self) -> WarehouseService<'_> {
        WarehouseService::new(self)
    }

    pub fn documents(&self) -> DocumentService<'_> {
        DocumentService::new(self)
    }

    pub fn affiliations(&self) -> AffiliationService<'_> {
        AffiliationService::new(self)
    }

    pub fn bookings(&self) -> BookingService<'_> {
        BookingService::new(self)
    }

    // --- Generic verbs ---

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, &[], None::<&()>).await
    }

    pub async fn get_query<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ApiResult<T> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn post_query<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ApiResult<T> {
        self.send(Method::POST, path, query, None::<&()>).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn put_query<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ApiResult<T> {
        self.send(Method::PUT, path, query, None::<&()>).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, path, &[], None::<&()>).await
    }

    /// Build, send and classify one request.
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let result = self.execute(method.clone(), path, query, body).await;
        if let Err(err) = &result {
            log::warn!("{} /{} failed: {} ({})", method, path.trim_start_matches('/'), err, err.kind);
            if err.is_unauthorized() {
                self.expire_session().await;
            }
        }
        result
    }

    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = utils::endpoint(&self.base_url, path).map_err(ApiError::unexpected)?;
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.store.token().await.map_err(ApiError::unexpected)? {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            // The status is authoritative even when the body is cut short.
            let bytes = response.bytes().await.unwrap_or_else(|e| {
                log::debug!("Discarding unreadable {} body: {}", status, e);
                Default::default()
            });
            return Err(classify_status(status, &bytes));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&e))?;
        decode_body(&bytes)
    }

    /// Forced logout after a 401.
    async fn expire_session(&self) {
        if let Err(e) = self.store.clear().await {
            log::error!("Failed to clear session after 401: {}", e);
        } else {
            log::info!("Session expired; stored credentials cleared");
        }
        self.navigator.navigate(LOGIN_PATH);
    }
}

/// Parse a success body. An empty body reads as JSON `null`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ApiResult<T> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(ApiError::unexpected)
}
