//! Error types for the community SDK.

/// Result type for SDK operations.
pub type CommunityResult<T> = Result<T, CommunityError>;

/// Error types that can occur when using the community SDK.
#[derive(Debug, thiserror::Error)]
pub enum CommunityError {
    /// Region key is not one of the supported deployments.
    #[error("Unknown region '{region}'. Supported: {supported}")]
    InvalidRegion { region: String, supported: String },

    /// A required credential was neither passed nor found in the environment.
    #[error("Missing credential: set {name} or pass it to the client builder")]
    MissingCredential { name: &'static str },

    /// Content type is not one of the known post kinds.
    #[error("Unknown content type '{content_type}'. Supported: {supported}")]
    UnknownContentType {
        content_type: String,
        supported: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token endpoint rejected the client credentials.
    #[error("Authentication failed (status {status}): {body}")]
    Authentication { status: u16, body: String },

    /// API returned an error response.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Coarse classification of a [`CommunityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad region, credential or content type. Raised before any network call.
    Configuration,
    /// Non-2xx from the token endpoint.
    Authentication,
    /// Non-2xx from a resource endpoint.
    Upstream,
    /// Connection failure or timeout.
    Transport,
    /// Response could not be decoded.
    Decode,
}

impl CommunityError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRegion { .. }
            | Self::MissingCredential { .. }
            | Self::UnknownContentType { .. }
            | Self::Config(_)
            | Self::InvalidUrl(_) => ErrorKind::Configuration,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Api { .. } => ErrorKind::Upstream,
            Self::Http(_) | Self::Timeout => ErrorKind::Transport,
            Self::Json(_) => ErrorKind::Decode,
        }
    }

    /// HTTP status carried by upstream failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a resource endpoint answering 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for CommunityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
