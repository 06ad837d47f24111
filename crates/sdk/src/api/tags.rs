//! Tag API endpoints.

use crate::client::CommunityClient;
use crate::error::CommunityResult;
use crate::query::Paging;
use serde_json::Value;

/// Tags API for public and moderator tags.
pub struct TagsApi<'a> {
    client: &'a CommunityClient,
}

impl<'a> TagsApi<'a> {
    pub(crate) fn new(client: &'a CommunityClient) -> Self {
        Self { client }
    }

    /// List public tags.
    pub async fn list(&self, paging: &Paging) -> CommunityResult<Value> {
        self.client.http.get_with_query("/v2/tags", paging).await
    }

    /// List moderator tags.
    pub async fn moderator(&self, paging: &Paging) -> CommunityResult<Value> {
        self.client
            .http
            .get_with_query("/v2/moderatorTags", paging)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::client_for;
    use crate::query::Paging;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": [{"id": "1", "name": "api"}]})),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let result = client.tags().list(&Paging::new()).await.unwrap();
        assert_eq!(result["result"][0]["name"], "api");
    }

    #[tokio::test]
    async fn test_moderator_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/moderatorTags"))
            .and(query_param("page", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": [{"name": "escalated"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let result = client.tags().moderator(&Paging::new().page(3)).await.unwrap();
        assert_eq!(result["result"][0]["name"], "escalated");
    }
}
