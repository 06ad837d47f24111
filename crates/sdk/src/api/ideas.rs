//! Idea metadata endpoints.

use crate::client::CommunityClient;
use crate::error::CommunityResult;
use serde_json::Value;

/// Ideas API for idea workflow enumerations.
pub struct IdeasApi<'a> {
    client: &'a CommunityClient,
}

impl<'a> IdeasApi<'a> {
    pub(crate) fn new(client: &'a CommunityClient) -> Self {
        Self { client }
    }

    /// List idea statuses.
    pub async fn statuses(&self) -> CommunityResult<Value> {
        self.client.http.get("/v2/ideaStatuses").await
    }

    /// List product areas ideas can be filed under.
    pub async fn product_areas(&self) -> CommunityResult<Value> {
        self.client.http.get("/v2/productAreas").await
    }
}
