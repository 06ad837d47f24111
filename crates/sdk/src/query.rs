//! Query parameter types.
//!
//! Every filter is optional and unset fields are left out of the query
//! string entirely. List filters go out as a single comma-joined value and
//! date ranges as a single JSON object per dimension.

use crate::content_type::ContentType;
use serde::{Serialize, Serializer};

/// A list sent as one comma-joined query value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommaList(String);

impl CommaList {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn join<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = items
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self(parts.join(","))
    }
}

impl From<&str> for CommaList {
    fn from(joined: &str) -> Self {
        Self(joined.trim().to_string())
    }
}

impl From<String> for CommaList {
    fn from(joined: String) -> Self {
        Self::from(joined.as_str())
    }
}

impl From<Vec<String>> for CommaList {
    fn from(items: Vec<String>) -> Self {
        Self::join(items)
    }
}

impl From<Vec<&str>> for CommaList {
    fn from(items: Vec<&str>) -> Self {
        Self::join(items)
    }
}

impl From<&[&str]> for CommaList {
    fn from(items: &[&str]) -> Self {
        Self::join(items)
    }
}

impl<const N: usize> From<[&str; N]> for CommaList {
    fn from(items: [&str; N]) -> Self {
        Self::join(items)
    }
}

impl From<Vec<ContentType>> for CommaList {
    fn from(items: Vec<ContentType>) -> Self {
        Self::join(items.iter().map(ContentType::as_str))
    }
}

impl From<ContentType> for CommaList {
    fn from(item: ContentType) -> Self {
        Self(item.as_str().to_string())
    }
}

impl Serialize for CommaList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn non_empty(list: CommaList) -> Option<CommaList> {
    (!list.is_empty()).then_some(list)
}

/// Inclusive date bounds for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl DateRange {
    /// Build a range from optional bounds; `None` when neither is set.
    pub fn new(from: Option<String>, to: Option<String>) -> Option<Self> {
        if from.is_none() && to.is_none() {
            None
        } else {
            Some(Self { from, to })
        }
    }

    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: None,
        }
    }

    pub fn until(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: Some(to.into()),
        }
    }

    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

fn json_encoded<S: Serializer>(
    range: &Option<DateRange>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match range {
        Some(range) => {
            let encoded = serde_json::to_string(range).map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(&encoded)
        }
        None => serializer.serialize_none(),
    }
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paging {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Paging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Filters shared by the topic listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopicFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_types: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderator_tags: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_encoded"
    )]
    pub created_at: Option<DateRange>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_encoded"
    )]
    pub last_activity_at: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl TopicFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_types(mut self, types: impl Into<CommaList>) -> Self {
        self.content_types = non_empty(types.into());
        self
    }

    pub fn category_ids(mut self, ids: impl Into<CommaList>) -> Self {
        self.category_ids = non_empty(ids.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<CommaList>) -> Self {
        self.tags = non_empty(tags.into());
        self
    }

    pub fn moderator_tags(mut self, tags: impl Into<CommaList>) -> Self {
        self.moderator_tags = non_empty(tags.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn created(mut self, range: DateRange) -> Self {
        self.created_at = Some(range);
        self
    }

    pub fn last_active(mut self, range: DateRange) -> Self {
        self.last_activity_at = Some(range);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Free-text search across content types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_types: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<CommaList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            content_types: None,
            category_ids: None,
            tags: None,
            sort: None,
            page: None,
            page_size: None,
        }
    }

    pub fn content_types(mut self, types: impl Into<CommaList>) -> Self {
        self.content_types = non_empty(types.into());
        self
    }

    pub fn category_ids(mut self, ids: impl Into<CommaList>) -> Self {
        self.category_ids = non_empty(ids.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<CommaList>) -> Self {
        self.tags = non_empty(tags.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Tag lookup by name, optionally ordered by usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl TagSearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Topic lookup by id across every content type.
#[derive(Debug, Serialize)]
pub(crate) struct TopicIdQuery {
    pub id: u64,
}
