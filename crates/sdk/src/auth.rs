//! OAuth2 client-credentials token acquisition and caching.

use crate::clock::Clock;
use crate::config::Credentials;
use crate::error::{CommunityError, CommunityResult};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;

/// Token endpoint, relative to the region base URL.
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Tokens are treated as expired this long before their declared expiry.
const EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Effective expiry for a token issued at `now`; lifetimes beyond the
/// representable range saturate instead of overflowing.
fn effective_expiry(now: DateTime<Utc>, expires_in: u64) -> DateTime<Utc> {
    let lifetime = expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
    i64::try_from(lifetime)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A bearer token and the instant it stops being reused.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Owns the cached bearer token of one client.
///
/// The check-then-fetch sequence runs under a single async mutex, so
/// concurrent callers that find the token expired share one upstream
/// request.
#[derive(Debug)]
pub struct TokenManager {
    http: Client,
    token_url: Url,
    credentials: Credentials,
    scope: Option<String>,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(
        http: Client,
        base_url: &Url,
        credentials: Credentials,
        scope: Option<String>,
        clock: Arc<dyn Clock>,
    ) -> CommunityResult<Self> {
        Ok(Self {
            http,
            token_url: base_url.join(TOKEN_PATH)?,
            credentials,
            scope,
            clock,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid bearer token, fetching a new one when needed.
    pub async fn bearer(&self) -> CommunityResult<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(self.clock.now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Currently cached token, if any.
    pub async fn current(&self) -> Option<AccessToken> {
        self.cached.lock().await.clone()
    }

    async fn fetch(&self) -> CommunityResult<AccessToken> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
        ];
        if let Some(scope) = self.scope.as_deref() {
            form.push(("scope", scope));
        }

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token request rejected");
            return Err(CommunityError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TokenResponse = serde_json::from_str(&body)?;
        let expires_at = effective_expiry(
            self.clock.now(),
            parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        );

        info!(
            client_id = self.credentials.client_id(),
            expires_at = %expires_at,
            "Acquired access token"
        );

        Ok(AccessToken {
            value: parsed.access_token,
            expires_at,
        })
    }
}
