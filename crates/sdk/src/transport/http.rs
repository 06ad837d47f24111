//! HTTP transport layer for the community SDK.

use crate::auth::TokenManager;
use crate::config::ClientConfig;
use crate::error::{CommunityError, CommunityResult};
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport that attaches a bearer token to every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<TokenManager>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> CommunityResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let tokens = TokenManager::new(
            client.clone(),
            &config.base_url,
            config.credentials.clone(),
            config.scope.clone(),
            config.clock.clone(),
        )?;

        Ok(Self {
            client,
            config,
            tokens: Arc::new(tokens),
        })
    }

    /// Token cache shared by every request of this transport.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> CommunityResult<url::Url> {
        self.config
            .base_url
            .join(path)
            .map_err(CommunityError::InvalidUrl)
    }

    /// Authorize and send a request, failing on any non-2xx status.
    async fn execute<T: DeserializeOwned>(
        &self,
        request_builder: RequestBuilder,
    ) -> CommunityResult<T> {
        let token = self.tokens.bearer().await?;
        let response = request_builder.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Request failed");
            return Err(CommunityError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> CommunityResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        self.execute(self.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> CommunityResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        self.execute(self.client.get(url).query(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::config::{Credentials, Region};
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            region: Region::EuWest1,
            base_url: url::Url::parse(base_url).unwrap(),
            credentials: Credentials::new("test-id", "test-secret"),
            scope: None,
            timeout: Duration::from_secs(30),
            clock: Arc::new(SystemClock),
        })
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123",
                "expires_in": 3600,
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_request_sends_bearer() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/protected"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "authorized".to_string(),
                value: 100,
            }))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: TestResponse = transport.get("/api/protected").await.unwrap();
        assert_eq!(result.message, "authorized");
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/items"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: serde_json::Value = transport
            .get_with_query("/api/items", &[("page", 2)])
            .await
            .unwrap();
        assert_eq!(result, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_error_carries_status_and_body() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/notfound"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: CommunityResult<TestResponse> = transport.get("/api/notfound").await;
        match result {
            Err(CommunityError::Api { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_request_keeps_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123",
                "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let first: CommunityResult<serde_json::Value> = transport.get("/api/broken").await;
        let second: CommunityResult<serde_json::Value> = transport.get("/api/broken").await;
        assert_eq!(first.unwrap_err().status(), Some(500));
        assert_eq!(second.unwrap_err().status(), Some(500));
        assert!(transport.tokens().current().await.is_some());
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result: CommunityResult<serde_json::Value> = transport.get("/api/html").await;
        assert!(matches!(result, Err(CommunityError::Json(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = Arc::new(ClientConfig {
            timeout: Duration::from_millis(100),
            ..(*create_config(&server.uri())).clone()
        });
        let transport = HttpTransport::new(config).unwrap();

        let result: CommunityResult<serde_json::Value> = transport.get("/api/slow").await;
        assert!(matches!(result, Err(CommunityError::Timeout)));
    }

    #[tokio::test]
    async fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8080")).unwrap();

        let url = transport.build_url("/v2/topics").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v2/topics");
    }
}
