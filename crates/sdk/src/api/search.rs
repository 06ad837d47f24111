//! Search API endpoints.

use crate::client::CommunityClient;
use crate::error::CommunityResult;
use crate::query::{SearchQuery, TagSearchQuery};
use serde_json::Value;

/// Search API for free-text and tag lookups.
pub struct SearchApi<'a> {
    client: &'a CommunityClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a CommunityClient) -> Self {
        Self { client }
    }

    /// Search community content by keyword.
    pub async fn content(&self, query: &SearchQuery) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query("/v2/topics/search", query)
            .await
    }

    /// Look up tags by name.
    pub async fn tags(&self, query: &TagSearchQuery) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query("/v2/tags/search", query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client_for, last_query};
    use crate::query::{SearchQuery, TagSearchQuery};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics/search"))
            .and(query_param("q", "SSO"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": [{"id": "1", "title": "SSO"}]})),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let result = client.search().content(&SearchQuery::new("SSO")).await.unwrap();
        assert_eq!(result["result"][0]["title"], "SSO");
        assert_eq!(last_query(&server).await.as_deref(), Some("q=SSO"));
    }

    #[tokio::test]
    async fn test_search_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics/search"))
            .and(query_param("content_types", "question,article"))
            .and(query_param("tags", "api,rest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let query = SearchQuery::new("api")
            .content_types(vec!["question".to_string(), "article".to_string()])
            .tags("api,rest");
        client.search().content(&query).await.unwrap();
    }

    #[tokio::test]
    async fn test_tag_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/tags/search"))
            .and(query_param("name", "sso"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": [{"name": "sso"}]})),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let result = client
            .search()
            .tags(&TagSearchQuery::new().name("sso"))
            .await
            .unwrap();
        assert_eq!(result["result"][0]["name"], "sso");
    }
}
