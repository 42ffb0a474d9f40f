// src/services/warehouses.rs

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::ApiResult;
use crate::models::Warehouse;

/// Endpoints under `/entrepots`.
pub struct WarehouseService<'a> {
    client: &'a ApiClient,
}

impl<'a> WarehouseService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Warehouse>> {
        self.client.get(endpoints::WAREHOUSES).await
    }
}
