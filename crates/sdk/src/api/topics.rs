//! Topic API endpoints.

use crate::client::CommunityClient;
use crate::content_type::IntoContentType;
use crate::error::CommunityResult;
use crate::query::{Paging, TopicFilter, TopicIdQuery};
use serde_json::Value;

const TOPICS_PATH: &str = "/v2/topics";

/// Topics API for listing and reading community posts.
pub struct TopicsApi<'a> {
    client: &'a CommunityClient,
}

impl<'a> TopicsApi<'a> {
    pub(crate) fn new(client: &'a CommunityClient) -> Self {
        Self { client }
    }

    /// List topics of every content type.
    pub async fn list(&self, filter: &TopicFilter) -> CommunityResult<Value> {
        self.client.http.get_with_query(TOPICS_PATH, filter).await
    }

    /// List topics of one content type.
    pub async fn list_by_type(
        &self,
        content_type: impl IntoContentType,
        filter: &TopicFilter,
    ) -> CommunityResult<Value> {
        let content_type = content_type.into_content_type()?;
        self.client
            .http
            .get_with_query(&content_type.collection_path(), filter)
            .await
    }

    /// Get the full detail of a topic.
    pub async fn get(&self, content_type: impl IntoContentType, id: u64) -> CommunityResult<Value> {
        let content_type = content_type.into_content_type()?;
        self.client.http.get(&content_type.item_path(id)).await
    }

    /// Look a topic up by id alone. The result carries its `contentType`,
    /// which [`get`](Self::get) needs.
    pub async fn get_by_id(&self, id: u64) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query(TOPICS_PATH, &TopicIdQuery { id })
            .await
    }

    /// List replies to a topic.
    pub async fn replies(
        &self,
        content_type: impl IntoContentType,
        id: u64,
        paging: &Paging,
    ) -> CommunityResult<Value> {
        let content_type = content_type.into_content_type()?;
        self.client
            .http
            .get_with_query(&format!("{}/replies", content_type.item_path(id)), paging)
            .await
    }

    /// Get a single reply.
    pub async fn reply(
        &self,
        content_type: impl IntoContentType,
        id: u64,
        reply_id: u64,
    ) -> CommunityResult<Value> {
        let content_type = content_type.into_content_type()?;
        self.client
            .http
            .get(&format!("{}/replies/{}", content_type.item_path(id), reply_id))
            .await
    }

    /// Get poll results attached to a topic.
    pub async fn poll(
        &self,
        content_type: impl IntoContentType,
        id: u64,
    ) -> CommunityResult<Value> {
        let content_type = content_type.into_content_type()?;
        self.client
            .http
            .get(&format!("{}/poll", content_type.item_path(id)))
            .await
    }
}
