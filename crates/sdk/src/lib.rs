//! # GSCC SDK
//!
//! Read-only async client for the Gainsight Customer Communities (formerly
//! inSided) REST API. Handles the OAuth2 client-credentials exchange,
//! caches the bearer token until shortly before it expires, and exposes
//! the topic, category, tag and idea endpoints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gscc_sdk::{CommunityClient, CommunityResult, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> CommunityResult<()> {
//!     // Credentials default to GS_CC_CLIENT_ID / GS_CC_CLIENT_SECRET
//!     let client = CommunityClient::builder()
//!         .region("us-west-2")
//!         .build()?;
//!
//!     let hits = client.search().content(&SearchQuery::new("SSO")).await?;
//!     println!("{}", serde_json::to_string_pretty(&hits)?);
//!
//!     // Detail endpoints are partitioned by content type
//!     let topic = client.topics().get("question", 42).await?;
//!     println!("{}", topic["title"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! Response bodies are returned as [`serde_json::Value`] exactly as the API
//! sent them.

pub mod api;
pub mod auth;
pub mod client;
pub mod clock;
pub mod config;
pub mod content_type;
pub mod error;
pub mod query;
pub mod transport;

// Re-export main client
pub use client::{CommunityClient, CommunityClientBuilder};
pub use clock::{Clock, SystemClock};
pub use config::{ClientConfig, Credentials, Region};
pub use content_type::{ContentType, IntoContentType};
pub use error::{CommunityError, CommunityResult, ErrorKind};
pub use query::{CommaList, DateRange, Paging, SearchQuery, TagSearchQuery, TopicFilter};
