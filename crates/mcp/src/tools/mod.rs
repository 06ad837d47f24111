pub mod categories;
mod registry;
pub mod search;
pub mod taxonomy;
pub mod topics;

pub use categories::{
    GetCategoryTool, GetCategoryTopicCountsTool, GetCategoryTreeTool, ListCategoriesTool,
    ListCategoryTopicsTool,
};
pub use registry::{
    json_schema_array, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};
pub use search::{SearchCommunityTool, SearchTagsTool};
pub use taxonomy::{ListIdeaStatusesTool, ListModeratorTagsTool, ListProductAreasTool, ListTagsTool};
pub use topics::{
    GetPollResultsTool, GetReplyTool, GetTopicTool, ListContentTool, ListIdeasTool,
    ListRepliesTool, ListTopicsTool,
};

use crate::links::LinkResolver;
use crate::protocol::CallToolResult;
use anyhow::{Context, Result};
use gscc_sdk::{
    CommaList, CommunityClient, CommunityError, CommunityResult, ContentType, DateRange, Paging,
    TopicFilter,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// State shared by every tool: one client for the process lifetime.
pub struct ToolContext {
    client: CommunityClient,
    links: Option<LinkResolver>,
}

impl ToolContext {
    pub fn new(client: CommunityClient, links: Option<LinkResolver>) -> Self {
        Self { client, links }
    }

    pub fn client(&self) -> &CommunityClient {
        &self.client
    }

    /// Render an API outcome as tool output.
    pub(crate) fn respond(&self, result: CommunityResult<Value>) -> Result<CallToolResult> {
        match result {
            Ok(body) => self.render(body),
            Err(err) => Ok(failure(&err)),
        }
    }

    pub(crate) fn render(&self, mut body: Value) -> Result<CallToolResult> {
        if let Some(links) = &self.links {
            links.resolve(&mut body);
        }
        Ok(CallToolResult::text(serde_json::to_string_pretty(&body)?))
    }
}

pub(crate) fn failure(err: &CommunityError) -> CallToolResult {
    warn!(kind = ?err.kind(), error = %err, "Tool call failed");
    CallToolResult::error(format!("{:?} failure: {}", err.kind(), err))
}

/// Register every community tool against one shared context.
pub fn register_all(registry: &mut ToolRegistry, ctx: Arc<ToolContext>) {
    registry.register(Arc::new(SearchCommunityTool::new(ctx.clone())));
    registry.register(Arc::new(SearchTagsTool::new(ctx.clone())));

    registry.register(Arc::new(ListTopicsTool::new(ctx.clone())));
    registry.register(Arc::new(ListIdeasTool::new(ctx.clone())));
    registry.register(Arc::new(ListContentTool::new(ctx.clone())));
    registry.register(Arc::new(GetTopicTool::new(ctx.clone())));
    registry.register(Arc::new(ListRepliesTool::new(ctx.clone())));
    registry.register(Arc::new(GetReplyTool::new(ctx.clone())));
    registry.register(Arc::new(GetPollResultsTool::new(ctx.clone())));

    registry.register(Arc::new(ListCategoriesTool::new(ctx.clone())));
    registry.register(Arc::new(GetCategoryTool::new(ctx.clone())));
    registry.register(Arc::new(GetCategoryTreeTool::new(ctx.clone())));
    registry.register(Arc::new(GetCategoryTopicCountsTool::new(ctx.clone())));
    registry.register(Arc::new(ListCategoryTopicsTool::new(ctx.clone())));

    registry.register(Arc::new(ListTagsTool::new(ctx.clone())));
    registry.register(Arc::new(ListModeratorTagsTool::new(ctx.clone())));
    registry.register(Arc::new(ListIdeaStatusesTool::new(ctx.clone())));
    registry.register(Arc::new(ListProductAreasTool::new(ctx)));
}

/// Deserialize tool arguments; a missing argument object counts as empty.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

/// A list argument given either as a comma-joined string or as an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListArg {
    Joined(String),
    Items(Vec<Value>),
}

impl From<ListArg> for CommaList {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Joined(joined) => CommaList::from(joined),
            ListArg::Items(items) => CommaList::from(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect::<Vec<String>>(),
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PagingArgs {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
}

impl From<PagingArgs> for Paging {
    fn from(args: PagingArgs) -> Self {
        Paging {
            page: args.page,
            page_size: args.page_size,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopicFilterArgs {
    #[serde(default)]
    content_types: Option<ListArg>,
    #[serde(default)]
    category_ids: Option<ListArg>,
    #[serde(default)]
    tags: Option<ListArg>,
    #[serde(default)]
    moderator_tags: Option<ListArg>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    created_after: Option<String>,
    #[serde(default)]
    created_before: Option<String>,
    #[serde(default)]
    active_after: Option<String>,
    #[serde(default)]
    active_before: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
}

impl From<TopicFilterArgs> for TopicFilter {
    fn from(args: TopicFilterArgs) -> Self {
        let mut filter = TopicFilter::new();
        if let Some(types) = args.content_types {
            filter = filter.content_types(types);
        }
        if let Some(ids) = args.category_ids {
            filter = filter.category_ids(ids);
        }
        if let Some(tags) = args.tags {
            filter = filter.tags(tags);
        }
        if let Some(tags) = args.moderator_tags {
            filter = filter.moderator_tags(tags);
        }
        filter.sort = args.sort;
        filter.created_at = DateRange::new(args.created_after, args.created_before);
        filter.last_activity_at = DateRange::new(args.active_after, args.active_before);
        filter.page = args.page;
        filter.page_size = args.page_size;
        filter
    }
}

pub(crate) fn content_type_names() -> Vec<&'static str> {
    ContentType::ALL.iter().map(ContentType::as_str).collect()
}

pub(crate) fn paging_properties() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("page".into(), json_schema_integer("Page number for pagination"));
    props.insert("page_size".into(), json_schema_integer("Results per page (1-100)"));
    props
}

pub(crate) fn topic_filter_properties() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(
        "content_types".into(),
        json_schema_array(
            json_schema_enum(&content_type_names(), "Content type"),
            "Filter by content type(s)",
        ),
    );
    props.insert(
        "category_ids".into(),
        json_schema_array(json_schema_string("Category ID"), "Filter by category ID(s)"),
    );
    props.insert("tags".into(), json_schema_string("Comma-separated public tags"));
    props.insert(
        "moderator_tags".into(),
        json_schema_string("Comma-separated moderator tags"),
    );
    props.insert(
        "sort".into(),
        json_schema_string("Sort field: lastActivityAt, createdAt, likes, voteCount, replyCount"),
    );
    props.insert(
        "created_after".into(),
        json_schema_string("ISO date, e.g. 2025-01-01"),
    );
    props.insert("created_before".into(), json_schema_string("ISO date"));
    props.insert(
        "active_after".into(),
        json_schema_string("ISO date of last activity lower bound"),
    );
    props.insert(
        "active_before".into(),
        json_schema_string("ISO date of last activity upper bound"),
    );
    props.extend(paging_properties());
    props
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::protocol::ToolContent;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn context_for(server: &MockServer) -> Arc<ToolContext> {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123",
                "expires_in": 3600,
            })))
            .mount(server)
            .await;

        let client = CommunityClient::builder()
            .client_id("test-id")
            .client_secret("test-secret")
            .base_url(server.uri())
            .build_with_env(|_| None)
            .unwrap();
        Arc::new(ToolContext::new(client, None))
    }

    pub fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0] {
            ToolContent::Text { text } => text,
        }
    }

    pub fn json_of(result: &CallToolResult) -> Value {
        serde_json::from_str(text_of(result)).unwrap()
    }

    pub async fn last_query(server: &MockServer) -> Option<String> {
        server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "GET")
            .last()
            .and_then(|r| r.url.query().map(str::to_string))
    }
}
