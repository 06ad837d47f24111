//! Main client for the community SDK.

use crate::api::*;
use crate::clock::{Clock, SystemClock};
use crate::config::{
    ClientConfig, Credentials, Region, CLIENT_ID_ENV, CLIENT_SECRET_ENV, DEFAULT_SCOPE,
    DEFAULT_TIMEOUT, REGION_ENV,
};
use crate::error::{CommunityError, CommunityResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for the Gainsight Customer Communities API.
///
/// Cloning is cheap and clones share one token cache.
#[derive(Debug, Clone)]
pub struct CommunityClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl CommunityClient {
    /// Create a new client builder.
    pub fn builder() -> CommunityClientBuilder {
        CommunityClientBuilder::new()
    }

    /// Build a client entirely from `GS_CC_*` environment variables.
    pub fn from_env() -> CommunityResult<Self> {
        Self::builder().build()
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig) -> CommunityResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Region this client was resolved for.
    pub fn region(&self) -> Region {
        self.config.region
    }

    /// Base URL every request is issued against.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Get the topics API.
    pub fn topics(&self) -> TopicsApi<'_> {
        TopicsApi::new(self)
    }

    /// Get the categories API.
    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    /// Get the tags API.
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(self)
    }

    /// Get the ideas API.
    pub fn ideas(&self) -> IdeasApi<'_> {
        IdeasApi::new(self)
    }
}

/// Builder for creating a CommunityClient.
pub struct CommunityClientBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    region: Option<String>,
    base_url: Option<String>,
    scope: Option<String>,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl CommunityClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            region: None,
            base_url: None,
            scope: Some(DEFAULT_SCOPE.to_string()),
            timeout: DEFAULT_TIMEOUT,
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the OAuth2 client id. Defaults to `GS_CC_CLIENT_ID`.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the OAuth2 client secret. Defaults to `GS_CC_CLIENT_SECRET`.
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Set the region key. Defaults to `GS_CC_REGION`, then `eu-west-1`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send requests somewhere other than the region's API host, e.g. a
    /// proxy or a mock server. The region is still validated.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the scope requested with the token.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Request tokens without a scope parameter.
    pub fn without_scope(mut self) -> Self {
        self.scope = None;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the time source used for token expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the client, reading unset values from the process environment.
    pub fn build(self) -> CommunityResult<CommunityClient> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Build the client, reading unset values through `env`.
    pub fn build_with_env<F>(self, env: F) -> CommunityResult<CommunityClient>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = Region::resolve(self.region.as_deref(), env(REGION_ENV).as_deref())?;

        let client_id = self
            .client_id
            .or_else(|| env(CLIENT_ID_ENV))
            .filter(|v| !v.is_empty())
            .ok_or(CommunityError::MissingCredential {
                name: CLIENT_ID_ENV,
            })?;
        let client_secret = self
            .client_secret
            .or_else(|| env(CLIENT_SECRET_ENV))
            .filter(|v| !v.is_empty())
            .ok_or(CommunityError::MissingCredential {
                name: CLIENT_SECRET_ENV,
            })?;

        let base_url_str = self
            .base_url
            .unwrap_or_else(|| region.base_url().to_string());
        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            region,
            base_url,
            credentials: Credentials::new(client_id, client_secret),
            scope: self.scope,
            timeout: self.timeout,
            clock: self.clock,
        };

        CommunityClient::from_config(config)
    }
}

impl Default for CommunityClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
