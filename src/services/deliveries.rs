// src/services/deliveries.rs

//! Deliveries: creation from a listing and the courier-side lifecycle
//! (start, complete with the recipient's code, cancel).

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::models::{Delivery, DeliveryRequest, DeliveryType, SegmentsInfo};

use super::item;

/// Endpoints under `/livraisons`.
pub struct DeliveryService<'a> {
    client: &'a ApiClient,
}

impl<'a> DeliveryService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a delivery of any kind.
    pub async fn create(&self, request: &DeliveryRequest) -> ApiResult<Delivery> {
        let Some(segment) = request.kind.creation_path() else {
            return Err(ApiError::unexpected(format!(
                "cannot create a delivery of type {:?}",
                request.kind
            )));
        };
        if request.kind.needs_warehouse() && request.warehouse_id.is_none() {
            return Err(ApiError::unexpected(format!(
                "a {} delivery needs a warehouse",
                request.kind.label().to_lowercase()
            )));
        }
        let query = request.to_query();
        let delivery: Delivery = self
            .client
            .post_query(&item(endpoints::DELIVERIES, segment), &query)
            .await?;
        log::info!(
            "Created {} {} for listing {}",
            request.kind.label().to_lowercase(),
            delivery.id,
            request.listing_id
        );
        Ok(delivery)
    }

    /// Door-to-door delivery.
    pub async fn create_full(
        &self,
        listing_id: i64,
        courier_id: i64,
        agreed_price: Option<f64>,
    ) -> ApiResult<Delivery> {
        self.create(&DeliveryRequest {
            kind: DeliveryType::Full,
            listing_id,
            courier_id,
            warehouse_id: None,
            agreed_price,
        })
        .await
    }

    /// First leg: the courier drops the parcel at a warehouse.
    pub async fn create_partial_drop(
        &self,
        listing_id: i64,
        courier_id: i64,
        warehouse_id: i64,
        agreed_price: Option<f64>,
    ) -> ApiResult<Delivery> {
        self.create(&DeliveryRequest {
            kind: DeliveryType::PartialDrop,
            listing_id,
            courier_id,
            warehouse_id: Some(warehouse_id),
            agreed_price,
        })
        .await
    }

    /// Second leg: the courier collects the parcel from a warehouse.
    pub async fn create_partial_pickup(
        &self,
        listing_id: i64,
        courier_id: i64,
        warehouse_id: i64,
        agreed_price: Option<f64>,
    ) -> ApiResult<Delivery> {
        self.create(&DeliveryRequest {
            kind: DeliveryType::PartialPickup,
            listing_id,
            courier_id,
            warehouse_id: Some(warehouse_id),
            agreed_price,
        })
        .await
    }

    pub async fn by_courier(&self, courier_id: i64) -> ApiResult<Vec<Delivery>> {
        let path = format!("{}/livreur/{}", endpoints::DELIVERIES, courier_id);
        self.client.get(&path).await
    }

    pub async fn by_listing(&self, listing_id: i64) -> ApiResult<Vec<Delivery>> {
        self.client.get(&Self::listing_path(listing_id)).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Delivery> {
        self.client.get(&item(endpoints::DELIVERIES, id)).await
    }

    pub async fn start(&self, id: i64) -> ApiResult<Delivery> {
        self.transition(id, "commencer", &[]).await
    }

    /// Close a delivery with the code the recipient received.
    pub async fn complete(&self, id: i64, validation_code: &str) -> ApiResult<Delivery> {
        let query = [("codeValidation", validation_code.trim().to_string())];
        self.transition(id, "terminer", &query).await
    }

    pub async fn cancel(&self, id: i64) -> ApiResult<Delivery> {
        self.transition(id, "annuler", &[]).await
    }

    /// Drop-off leg of a split delivery, `None` when the listing has none.
    pub async fn drop_segment(&self, listing_id: i64) -> ApiResult<Option<Delivery>> {
        let path = format!("{}/segment-depot", Self::listing_path(listing_id));
        match self.client.get(&path).await {
            Ok(delivery) => Ok(Some(delivery)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Legs already created for a listing and which ones may follow.
    pub async fn segments_info(&self, listing_id: i64) -> ApiResult<SegmentsInfo> {
        let path = format!("{}/segments-info", Self::listing_path(listing_id));
        self.client.get(&path).await
    }

    async fn transition(
        &self,
        id: i64,
        action: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Delivery> {
        let path = format!("{}/{}/{}", endpoints::DELIVERIES, id, action);
        let delivery: Delivery = self.client.put_query(&path, query).await?;
        log::info!("Delivery {}: {}", id, action);
        Ok(delivery)
    }

    fn listing_path(listing_id: i64) -> String {
        format!("{}/annonce/{}", endpoints::DELIVERIES, listing_id)
    }
}
