//! Community post kinds and their REST path segments.

use crate::error::{CommunityError, CommunityResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of community post. The API partitions topic resources by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Article,
    Conversation,
    Question,
    Idea,
    ProductUpdate,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Article,
        ContentType::Conversation,
        ContentType::Question,
        ContentType::Idea,
        ContentType::ProductUpdate,
    ];

    /// Name used by the API in payloads and filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Conversation => "conversation",
            Self::Question => "question",
            Self::Idea => "idea",
            Self::ProductUpdate => "productUpdate",
        }
    }

    /// Collection path segment, e.g. `questions`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Conversation => "conversations",
            Self::Question => "questions",
            Self::Idea => "ideas",
            Self::ProductUpdate => "productUpdates",
        }
    }

    pub(crate) fn collection_path(&self) -> String {
        format!("/v2/{}", self.path_segment())
    }

    pub(crate) fn item_path(&self, id: u64) -> String {
        format!("/v2/{}/{}", self.path_segment(), id)
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(ContentType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ContentType {
    type Err = CommunityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| CommunityError::UnknownContentType {
                content_type: s.to_string(),
                supported: Self::supported(),
            })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything an operation can turn into a [`ContentType`] before it builds a path.
pub trait IntoContentType {
    fn into_content_type(self) -> CommunityResult<ContentType>;
}

impl IntoContentType for ContentType {
    fn into_content_type(self) -> CommunityResult<ContentType> {
        Ok(self)
    }
}

impl IntoContentType for &str {
    fn into_content_type(self) -> CommunityResult<ContentType> {
        self.parse()
    }
}

impl IntoContentType for &String {
    fn into_content_type(self) -> CommunityResult<ContentType> {
        self.parse()
    }
}
