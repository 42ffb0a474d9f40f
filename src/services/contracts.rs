// src/services/contracts.rs

//! Merchant contracts.

use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::models::{Contract, NewContract};
use crate::utils::encode_segment;

use super::item;

/// Endpoints under `/contrats`.
pub struct ContractService<'a> {
    client: &'a ApiClient,
}

impl<'a> ContractService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Contract held by a merchant.
    pub async fn by_merchant(&self, merchant_id: i64) -> ApiResult<Contract> {
        self.client.get(&Self::merchant_path(merchant_id)).await
    }

    pub async fn exists_for_merchant(&self, merchant_id: i64) -> ApiResult<bool> {
        let path = format!("{}/exists", Self::merchant_path(merchant_id));
        self.client.get(&path).await
    }

    /// Look a contract up by its public number (`CTR-2025-0004`).
    pub async fn by_number(&self, number: &str) -> ApiResult<Contract> {
        let segment = encode_segment(number.trim()).map_err(ApiError::unexpected)?;
        let path = format!("{}/numero/{}", endpoints::CONTRACTS, segment);
        self.client.get(&path).await
    }

    pub async fn create(&self, merchant_id: i64, contract: &NewContract) -> ApiResult<Contract> {
        let created: Contract = self
            .client
            .post(&Self::merchant_path(merchant_id), contract)
            .await?;
        log::info!("Created contract {} for merchant {}", created.id, merchant_id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, contract: &NewContract) -> ApiResult<Contract> {
        self.client.put(&item(endpoints::CONTRACTS, id), contract).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let _: IgnoredAny = self.client.delete(&item(endpoints::CONTRACTS, id)).await?;
        Ok(())
    }

    fn merchant_path(merchant_id: i64) -> String {
        format!("{}/commercant/{}", endpoints::CONTRACTS, merchant_id)
    }
}
