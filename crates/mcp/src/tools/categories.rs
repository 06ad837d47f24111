// Category tools: listing, detail, hierarchy and per-category topics

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_integer, json_schema_object, paging_properties, parse_args,
    topic_filter_properties, PagingArgs, Tool, ToolContext, TopicFilterArgs,
};
use anyhow::Result;
use gscc_sdk::{Paging, TopicFilter};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Tool to list categories
pub struct ListCategoriesTool {
    ctx: Arc<ToolContext>,
}

impl ListCategoriesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListCategoriesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_categories".to_string(),
            description: "List community categories".to_string(),
            input_schema: json_schema_object(paging_properties().into(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: PagingArgs = parse_args("list_categories", arguments)?;
        let paging = Paging::from(args);
        self.ctx
            .respond(self.ctx.client().categories().list(&paging).await)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryIdArgs {
    category_id: u64,
}

/// Tool to get a single category
pub struct GetCategoryTool {
    ctx: Arc<ToolContext>,
}

impl GetCategoryTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetCategoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_category".to_string(),
            description: "Retrieve one category by ID".to_string(),
            input_schema: json_schema_object(
                json!({"category_id": json_schema_integer("Numeric ID of the category")}),
                vec!["category_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: CategoryIdArgs = parse_args("get_category", arguments)?;
        self.ctx
            .respond(self.ctx.client().categories().get(args.category_id).await)
    }
}

/// Tool to get the category hierarchy
pub struct GetCategoryTreeTool {
    ctx: Arc<ToolContext>,
}

impl GetCategoryTreeTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetCategoryTreeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_category_tree".to_string(),
            description: "Retrieve the full category hierarchy with nested children".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        self.ctx
            .respond(self.ctx.client().categories().tree().await)
    }
}

/// Tool to count topics per category
pub struct GetCategoryTopicCountsTool {
    ctx: Arc<ToolContext>,
}

impl GetCategoryTopicCountsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetCategoryTopicCountsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_category_topic_counts".to_string(),
            description: "Count topics in each category".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        self.ctx
            .respond(self.ctx.client().categories().topic_counts().await)
    }
}

/// Tool to list topics inside a category
pub struct ListCategoryTopicsTool {
    ctx: Arc<ToolContext>,
}

impl ListCategoryTopicsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct ListCategoryTopicsArgs {
    category_id: u64,
    #[serde(flatten)]
    filter: TopicFilterArgs,
}

#[async_trait::async_trait]
impl Tool for ListCategoryTopicsTool {
    fn schema(&self) -> ToolSchema {
        let mut props = topic_filter_properties();
        props.remove("category_ids");
        props.insert(
            "category_id".into(),
            json_schema_integer("Numeric ID of the category"),
        );

        ToolSchema {
            name: "list_category_topics".to_string(),
            description: "List topics in one category, with the usual topic filters".to_string(),
            input_schema: json_schema_object(props.into(), vec!["category_id"]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListCategoryTopicsArgs = parse_args("list_category_topics", arguments)?;
        let filter = TopicFilter::from(args.filter);
        self.ctx.respond(
            self.ctx
                .client()
                .categories()
                .topics(args.category_id, &filter)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{context_for, json_of, last_query, text_of};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_get(server: &MockServer, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_categories_with_paging() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/categories", 200, json!({"result": [{"id": "1"}]})).await;
        let tool = ListCategoriesTool::new(context_for(&server).await);

        let result = tool.execute(json!({"page_size": 50})).await.unwrap();
        assert_eq!(json_of(&result)["result"][0]["id"], "1");
        assert_eq!(last_query(&server).await.as_deref(), Some("page_size=50"));
    }

    #[tokio::test]
    async fn test_get_category_not_found_is_tool_error() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/categories/9", 404, json!({"error": "Not found"})).await;
        let tool = GetCategoryTool::new(context_for(&server).await);

        let result = tool.execute(json!({"category_id": 9})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("status 404"));
    }

    #[tokio::test]
    async fn test_get_category_requires_id() {
        let server = MockServer::start().await;
        let tool = GetCategoryTool::new(context_for(&server).await);

        assert!(tool.execute(json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_tree_and_counts() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "/v2/categories/tree",
            200,
            json!([{"id": "1", "children": [{"id": "2"}]}]),
        )
        .await;
        mount_get(
            &server,
            "/v2/categories/topicCounts",
            200,
            json!({"1": 12, "2": 3}),
        )
        .await;
        let ctx = context_for(&server).await;

        let tree = GetCategoryTreeTool::new(ctx.clone())
            .execute(Value::Null)
            .await
            .unwrap();
        assert_eq!(json_of(&tree)[0]["children"][0]["id"], "2");

        let counts = GetCategoryTopicCountsTool::new(ctx)
            .execute(json!({}))
            .await
            .unwrap();
        assert_eq!(json_of(&counts)["1"], 12);
    }

    #[tokio::test]
    async fn test_list_category_topics_filters() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/categories/5/topics", 200, json!({"result": []})).await;
        let tool = ListCategoryTopicsTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"category_id": 5, "tags": ["sso", "saml"], "sort": "createdAt"}))
            .await
            .unwrap();
        assert_eq!(json_of(&result), json!({"result": []}));
        assert_eq!(
            last_query(&server).await.as_deref(),
            Some("tags=sso%2Csaml&sort=createdAt")
        );
    }
}
