use crate::links::LinkResolver;
use anyhow::{Context, Result};
use gscc_sdk::{CommunityClient, CommunityClientBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Path of an optional TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "GS_CC_CONFIG";
/// Public community address used to absolutize links; overrides the file.
pub const COMMUNITY_URL_ENV: &str = "GS_CC_COMMUNITY_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Region identifier; falls back to `GS_CC_REGION` and then the default.
    #[serde(default)]
    pub region: Option<String>,

    /// OAuth2 scope. An empty string disables the scope parameter.
    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub community_url: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            region: None,
            scope: None,
            timeout_secs: default_timeout_secs(),
            community_url: None,
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")
        } else {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match env(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(url) = env(COMMUNITY_URL_ENV).filter(|u| !u.is_empty()) {
            config.community_url = Some(url);
        }

        Ok(config)
    }

    /// Client builder carrying this configuration; credentials still come
    /// from the environment when `build()` runs.
    pub fn client_builder(&self) -> CommunityClientBuilder {
        let mut builder =
            CommunityClient::builder().timeout(Duration::from_secs(self.timeout_secs));

        if let Some(region) = &self.region {
            builder = builder.region(region.clone());
        }

        match self.scope.as_deref() {
            Some("") => builder.without_scope(),
            Some(scope) => builder.scope(scope),
            None => builder,
        }
    }

    pub fn build_client(&self) -> Result<CommunityClient> {
        self.client_builder()
            .build()
            .context("Failed to build community client")
    }

    pub fn link_resolver(&self) -> Result<Option<LinkResolver>> {
        self.community_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map(LinkResolver::new)
                    .with_context(|| format!("Invalid community_url '{}'", raw))
            })
            .transpose()
    }
}
