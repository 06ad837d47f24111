// Search tools: free-text content search and tag lookup

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    content_type_names, json_schema_array, json_schema_enum, json_schema_object,
    json_schema_string, paging_properties, parse_args, ListArg, Tool, ToolContext,
};
use anyhow::Result;
use gscc_sdk::{SearchQuery, TagSearchQuery};
use serde::Deserialize;
use std::sync::Arc;

/// Tool to search community content by keyword
pub struct SearchCommunityTool {
    ctx: Arc<ToolContext>,
}

impl SearchCommunityTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct SearchCommunityArgs {
    query: String,
    #[serde(default)]
    content_types: Option<ListArg>,
    #[serde(default)]
    category_ids: Option<ListArg>,
    #[serde(default)]
    tags: Option<ListArg>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
}

impl From<SearchCommunityArgs> for SearchQuery {
    fn from(args: SearchCommunityArgs) -> Self {
        let mut query = SearchQuery::new(args.query);
        if let Some(types) = args.content_types {
            query = query.content_types(types);
        }
        if let Some(ids) = args.category_ids {
            query = query.category_ids(ids);
        }
        if let Some(tags) = args.tags {
            query = query.tags(tags);
        }
        query.sort = args.sort;
        query.page = args.page;
        query.page_size = args.page_size;
        query
    }
}

#[async_trait::async_trait]
impl Tool for SearchCommunityTool {
    fn schema(&self) -> ToolSchema {
        let mut props = serde_json::Map::new();
        props.insert("query".into(), json_schema_string("Search term"));
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
            "sort".into(),
            json_schema_string(
                "Sort field: lastActivityAt, createdAt, likes, voteCount, replyCount",
            ),
        );
        props.extend(paging_properties());

        ToolSchema {
            name: "search_community".to_string(),
            description: "Search community content by keyword across all content types".to_string(),
            input_schema: json_schema_object(props.into(), vec!["query"]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchCommunityArgs = parse_args("search_community", arguments)?;
        let query = SearchQuery::from(args);
        self.ctx
            .respond(self.ctx.client().search().content(&query).await)
    }
}

/// Tool to look up tags by name
pub struct SearchTagsTool {
    ctx: Arc<ToolContext>,
}

impl SearchTagsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct SearchTagsArgs {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for SearchTagsTool {
    fn schema(&self) -> ToolSchema {
        let mut props = serde_json::Map::new();
        props.insert("name".into(), json_schema_string("Tag name or prefix"));
        props.insert("sort".into(), json_schema_string("Sort field, e.g. usage"));
        props.extend(paging_properties());

        ToolSchema {
            name: "search_tags".to_string(),
            description: "Find public tags by name, optionally ordered by usage".to_string(),
            input_schema: json_schema_object(props.into(), vec![]),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchTagsArgs = parse_args("search_tags", arguments)?;
        let query = TagSearchQuery {
            name: args.name,
            sort: args.sort,
            page: args.page,
            page_size: args.page_size,
        };
        self.ctx.respond(self.ctx.client().search().tags(&query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{context_for, json_of, last_query};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_community_minimal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
            .mount(&server)
            .await;
        let tool = SearchCommunityTool::new(context_for(&server).await);

        let result = tool.execute(json!({"query": "SSO"})).await.unwrap();
        assert_eq!(result.is_error, None);
        assert_eq!(json_of(&result)["data"][0]["id"], 1);
        assert_eq!(last_query(&server).await.as_deref(), Some("q=SSO"));
    }

    #[tokio::test]
    async fn test_search_community_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        let tool = SearchCommunityTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({
                "query": "api",
                "content_types": ["question", "article"],
                "tags": "api,rest",
                "sort": "createdAt",
                "page": 2,
                "page_size": 10
            }))
            .await
            .unwrap();
        assert_eq!(json_of(&result), json!({"data": []}));

        let query = last_query(&server).await.unwrap();
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "api".to_string()),
                ("content_types".to_string(), "question,article".to_string()),
                ("tags".to_string(), "api,rest".to_string()),
                ("sort".to_string(), "createdAt".to_string()),
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let server = MockServer::start().await;
        let tool = SearchCommunityTool::new(context_for(&server).await);

        assert!(tool.execute(json!({"tags": "api"})).await.is_err());
    }

    #[tokio::test]
    async fn test_search_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/tags/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": [{"name": "sso"}]})),
            )
            .mount(&server)
            .await;
        let tool = SearchTagsTool::new(context_for(&server).await);

        let result = tool.execute(json!({"name": "sso"})).await.unwrap();
        assert_eq!(json_of(&result)["result"][0]["name"], "sso");
        assert_eq!(last_query(&server).await.as_deref(), Some("name=sso"));
    }
}
