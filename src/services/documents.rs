// src/services/documents.rs

//! Back-office review of the documents users upload.

use reqwest::Method;
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::constants::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::models::{Document, DocumentDecision, DocumentFilters, ReviewComment};

/// Endpoints under `/documents`.
pub struct DocumentService<'a> {
    client: &'a ApiClient,
}

impl<'a> DocumentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every document, narrowed locally by `filters`.
    pub async fn list(&self, filters: &DocumentFilters) -> ApiResult<Vec<Document>> {
        let documents: Vec<Document> = self.client.get(endpoints::DOCUMENTS).await?;
        Ok(documents.into_iter().filter(|d| filters.matches(d)).collect())
    }

    pub async fn by_user(&self, user_id: i64) -> ApiResult<Vec<Document>> {
        let path = format!("{}/user/{}", endpoints::DOCUMENTS, user_id);
        self.client.get(&path).await
    }

    /// Approve or reject a document. A rejection must say why.
    pub async fn review(
        &self,
        id: i64,
        decision: DocumentDecision,
        comment: Option<&str>,
    ) -> ApiResult<()> {
        let comment = comment.map(str::trim).filter(|c| !c.is_empty());
        if decision == DocumentDecision::Reject && comment.is_none() {
            return Err(ApiError::unexpected(
                "a comment is required to reject a document",
            ));
        }

        let path = format!("{}/{}/{}", endpoints::DOCUMENTS, id, decision.action());
        let body = comment.map(|comment| ReviewComment { comment });
        let _: IgnoredAny = self
            .client
            .send(Method::POST, &path, &[], body.as_ref())
            .await?;
        log::info!("Document {}: {:?}", id, decision);
        Ok(())
    }

    pub async fn approve(&self, id: i64, comment: Option<&str>) -> ApiResult<()> {
        self.review(id, DocumentDecision::Approve, comment).await
    }

    pub async fn reject(&self, id: i64, reason: &str) -> ApiResult<()> {
        self.review(id, DocumentDecision::Reject, Some(reason)).await
    }
}
