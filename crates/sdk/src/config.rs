//! Configuration types for the community SDK.

use crate::clock::Clock;
use crate::error::{CommunityError, CommunityResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Environment variable holding the OAuth2 client id.
pub const CLIENT_ID_ENV: &str = "GS_CC_CLIENT_ID";
/// Environment variable holding the OAuth2 client secret.
pub const CLIENT_SECRET_ENV: &str = "GS_CC_CLIENT_SECRET";
/// Environment variable selecting the region.
pub const REGION_ENV: &str = "GS_CC_REGION";

/// Default request timeout, applied to token and resource calls alike.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Scope requested with the client-credentials grant.
pub const DEFAULT_SCOPE: &str = "read";

/// Supported API deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    EuWest1,
    UsWest2,
}

impl Region {
    /// Every supported region.
    pub const ALL: [Region; 2] = [Region::EuWest1, Region::UsWest2];

    /// Region key as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EuWest1 => "eu-west-1",
            Self::UsWest2 => "us-west-2",
        }
    }

    /// Base URL of the API for this region.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::EuWest1 => "https://api2-eu-west-1.insided.com",
            Self::UsWest2 => "https://api2-us-west-2.insided.com",
        }
    }

    /// Resolve an explicit key, falling back to the environment value and
    /// then to the default region.
    pub fn resolve(explicit: Option<&str>, from_env: Option<&str>) -> CommunityResult<Self> {
        match explicit.or(from_env) {
            Some(key) => key.parse(),
            None => Ok(Self::default()),
        }
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(Region::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Region {
    type Err = CommunityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| CommunityError::InvalidRegion {
                region: s.to_string(),
                supported: Self::supported(),
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 client credentials.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the community client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Region the client was resolved for.
    pub region: Region,
    /// Base URL requests are issued against.
    pub base_url: Url,
    /// OAuth2 client credentials.
    pub credentials: Credentials,
    /// Scope sent with the token request, if any.
    pub scope: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Time source for token expiry.
    pub clock: Arc<dyn Clock>,
}
