// src/services/merchant_listings.rs

//! Listings posted by merchants, optionally reserved for their affiliated
//! couriers.

use reqwest::Method;
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::ApiResult;
use crate::models::{MerchantListing, NewMerchantListing};

use super::item;

/// Endpoints under `/annonces-commercants`.
pub struct MerchantListingService<'a> {
    client: &'a ApiClient,
}

impl<'a> MerchantListingService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<MerchantListing>> {
        self.client.get(endpoints::MERCHANT_LISTINGS).await
    }

    pub async fn by_merchant(&self, merchant_id: i64) -> ApiResult<Vec<MerchantListing>> {
        let path = format!("{}/commercant/{}", endpoints::MERCHANT_LISTINGS, merchant_id);
        self.client.get(&path).await
    }

    /// Listings visible to the signed-in courier through affiliation.
    pub async fn for_affiliated_couriers(&self) -> ApiResult<Vec<MerchantListing>> {
        self.client
            .get(&item(endpoints::MERCHANT_LISTINGS, "affilies"))
            .await
    }

    /// Assign a merchant listing to a courier.
    pub async fn take_charge(&self, id: i64, courier_id: i64) -> ApiResult<()> {
        let path = format!("{}/{}/prendre-en-charge", endpoints::MERCHANT_LISTINGS, id);
        let query = [("livreurId", courier_id.to_string())];
        let _: IgnoredAny = self.client.post_query(&path, &query).await?;
        log::info!("Courier {} took charge of merchant listing {}", courier_id, id);
        Ok(())
    }

    pub async fn create(
        &self,
        listing: &NewMerchantListing,
        merchant_id: i64,
    ) -> ApiResult<MerchantListing> {
        let query = [("commercantId", merchant_id.to_string())];
        self.client
            .send(Method::POST, endpoints::MERCHANT_LISTINGS, &query, Some(listing))
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<MerchantListing> {
        self.client.get(&item(endpoints::MERCHANT_LISTINGS, id)).await
    }

    pub async fn update(&self, id: i64, listing: &NewMerchantListing) -> ApiResult<MerchantListing> {
        self.client
            .put(&item(endpoints::MERCHANT_LISTINGS, id), listing)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let _: IgnoredAny = self
            .client
            .delete(&item(endpoints::MERCHANT_LISTINGS, id))
            .await?;
        Ok(())
    }

    pub async fn count_by_merchant(&self, merchant_id: i64) -> ApiResult<u64> {
        let path = format!(
            "{}/count/commercant/{}",
            endpoints::MERCHANT_LISTINGS,
            merchant_id
        );
        self.client.get(&path).await
    }
}
