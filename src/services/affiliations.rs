// src/services/affiliations.rs

//! Courier affiliation requests and their review.

use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::ApiResult;
use crate::models::Affiliation;

/// Affiliation endpoints under `/livreurs/{id}`.
pub struct AffiliationService<'a> {
    client: &'a ApiClient,
}

impl<'a> AffiliationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Ask to become an affiliated courier. The body is the message as a JSON string.
    pub async fn request(&self, courier_id: i64, message: Option<&str>) -> ApiResult<()> {
        let message = message.map(str::trim).unwrap_or_default();
        let _: IgnoredAny = self
            .client
            .post(&Self::path(courier_id, "demander-affiliation"), message)
            .await?;
        log::info!("Courier {} requested affiliation", courier_id);
        Ok(())
    }

    pub async fn status(&self, courier_id: i64) -> ApiResult<Affiliation> {
        self.client
            .get(&Self::path(courier_id, "statut-affiliation"))
            .await
    }

    /// Accept or refuse a pending request.
    pub async fn decide(
        &self,
        courier_id: i64,
        accept: bool,
        comment: Option<&str>,
    ) -> ApiResult<()> {
        let mut query = vec![("valider", accept.to_string())];
        if let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) {
            query.push(("commentaire", comment.to_string()));
        }
        let _: IgnoredAny = self
            .client
            .put_query(&Self::path(courier_id, "valider-affiliation"), &query)
            .await?;
        log::info!(
            "Affiliation of courier {} {}",
            courier_id,
            if accept { "accepted" } else { "refused" }
        );
        Ok(())
    }

    fn path(courier_id: i64, action: &str) -> String {
        format!("{}/{}/{}", endpoints::COURIERS, courier_id, action)
    }
}
