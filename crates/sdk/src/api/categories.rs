//! Category API endpoints.

use crate::client::CommunityClient;
use crate::error::CommunityResult;
use crate::query::{Paging, TopicFilter};
use serde_json::Value;

/// Categories API for browsing community structure.
pub struct CategoriesApi<'a> {
    client: &'a CommunityClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a CommunityClient) -> Self {
        Self { client }
    }

    /// List categories.
    pub async fn list(&self, paging: &Paging) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query("/v2/categories", paging)
            .await
    }

    /// Get a specific category.
    pub async fn get(&self, category_id: u64) -> CommunityResult<Value> {
        self.client
            .http
            .get(&format!("/v2/categories/{}", category_id))
            .await
    }

    /// Get the category hierarchy, parents with nested children.
    pub async fn tree(&self) -> CommunityResult<Value> {
        self.client.http.get("/v2/categories/tree").await
    }

    /// Get topic counts per category.
    pub async fn topic_counts(&self) -> CommunityResult<Value> {
        self.client.http.get("/v2/categories/topicCounts").await
    }

    /// List topics in a category.
    pub async fn topics(&self, category_id: u64, filter: &TopicFilter) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query(&format!("/v2/categories/{}/topics", category_id), filter)
            .await
    }
}
