// src/services/listings.rs

//! Customer listings.

use reqwest::Method;
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::ApiResult;
use crate::models::{Listing, ListingFilters, NewListing};

use super::item;

/// Endpoints under `/annonces`.
pub struct ListingService<'a> {
    client: &'a ApiClient,
}

impl<'a> ListingService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Listing>> {
        self.client.get(endpoints::LISTINGS).await
    }

    /// Listings matching a city and/or a kind. Empty filters match all.
    pub async fn search(&self, filters: &ListingFilters) -> ApiResult<Vec<Listing>> {
        let query = filters.to_query();
        self.client
            .get_query(&item(endpoints::LISTINGS, "search"), &query)
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Listing> {
        self.client.get(&item(endpoints::LISTINGS, id)).await
    }

    /// Publish a listing on behalf of `author_id`.
    pub async fn create(&self, listing: &NewListing, author_id: i64) -> ApiResult<Listing> {
        let query = [("auteurId", author_id.to_string())];
        let created: Listing = self
            .client
            .send(Method::POST, endpoints::LISTINGS, &query, Some(listing))
            .await?;
        log::info!("Created listing {} \"{}\"", created.id, created.title);
        Ok(created)
    }

    /// Listings authored by `user_id`.
    pub async fn mine(&self, user_id: i64) -> ApiResult<Vec<Listing>> {
        let path = format!("{}/mes-annonces/{}", endpoints::LISTINGS, user_id);
        self.client.get(&path).await
    }

    pub async fn update(&self, id: i64, listing: &NewListing) -> ApiResult<Listing> {
        self.client.put(&item(endpoints::LISTINGS, id), listing).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let _: IgnoredAny = self.client.delete(&item(endpoints::LISTINGS, id)).await?;
        log::info!("Deleted listing {}", id);
        Ok(())
    }
}
