// Topic tools: listing, detail with replies, single replies and polls

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    content_type_names, failure, json_schema_enum, json_schema_integer, json_schema_object,
    paging_properties, parse_args, topic_filter_properties, PagingArgs, Tool, ToolContext,
    TopicFilterArgs,
};
use anyhow::Result;
use gscc_sdk::{ContentType, Paging, TopicFilter};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

fn content_type_schema() -> Value {
    json_schema_enum(&content_type_names(), "Content type of the topic")
}

/// Tool to list topics across content types
pub struct ListTopicsTool {
    ctx: Arc<ToolContext>,
}

impl ListTopicsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListTopicsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_topics".to_string(),
            description: "List and filter community topics by type, category, tags and dates"
                .to_string(),
            input_schema: json_schema_object(topic_filter_properties().into(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: TopicFilterArgs = parse_args("list_topics", arguments)?;
        let filter = TopicFilter::from(args);
        self.ctx.respond(self.ctx.client().topics().list(&filter).await)
    }
}

/// Tool to list feature ideas
pub struct ListIdeasTool {
    ctx: Arc<ToolContext>,
}

impl ListIdeasTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListIdeasTool {
    fn schema(&self) -> ToolSchema {
        let mut props = topic_filter_properties();
        props.remove("content_types");

        ToolSchema {
            name: "list_ideas".to_string(),
            description: "List feature ideas, e.g. sorted by voteCount or lastActivityAt"
                .to_string(),
            input_schema: json_schema_object(props.into(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: TopicFilterArgs = parse_args("list_ideas", arguments)?;
        let filter = TopicFilter::from(args).content_types(ContentType::Idea);
        self.ctx.respond(self.ctx.client().topics().list(&filter).await)
    }
}

/// Tool to list topics of one content type
pub struct ListContentTool {
    ctx: Arc<ToolContext>,
}

impl ListContentTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct ListContentArgs {
    content_type: String,
    #[serde(flatten)]
    filter: TopicFilterArgs,
}

#[async_trait::async_trait]
impl Tool for ListContentTool {
    fn schema(&self) -> ToolSchema {
        let mut props = topic_filter_properties();
        props.remove("content_types");
        props.insert("content_type".into(), content_type_schema());

        ToolSchema {
            name: "list_content".to_string(),
            description: "List articles, conversations, questions, ideas or product updates"
                .to_string(),
            input_schema: json_schema_object(props.into(), vec!["content_type"]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListContentArgs = parse_args("list_content", arguments)?;
        let filter = TopicFilter::from(args.filter);
        self.ctx.respond(
            self.ctx
                .client()
                .topics()
                .list_by_type(&args.content_type, &filter)
                .await,
        )
    }
}

/// Tool to get a topic with its replies
pub struct GetTopicTool {
    ctx: Arc<ToolContext>,
}

impl GetTopicTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    /// Content type of a topic, looked up through the type-agnostic listing.
    async fn discover_content_type(&self, topic_id: u64) -> Result<Option<String>, CallToolResult> {
        let found = self
            .ctx
            .client()
            .topics()
            .get_by_id(topic_id)
            .await
            .map_err(|e| failure(&e))?;

        Ok(found["result"]
            .get(0)
            .and_then(|topic| topic["contentType"].as_str())
            .map(str::to_string))
    }
}

#[derive(Debug, Deserialize)]
struct GetTopicArgs {
    topic_id: u64,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    include_replies: Option<bool>,
}

#[async_trait::async_trait]
impl Tool for GetTopicTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_topic".to_string(),
            description: "Retrieve full details for a topic, including body content and replies"
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "topic_id": json_schema_integer("Numeric ID of the topic"),
                    "content_type": content_type_schema(),
                    "include_replies": {
                        "type": "boolean",
                        "description": "Attach the first page of replies (default: true)"
                    }
                }),
                vec!["topic_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetTopicArgs = parse_args("get_topic", arguments)?;

        let content_type = match args.content_type {
            Some(content_type) => content_type,
            None => match self.discover_content_type(args.topic_id).await {
                Ok(Some(content_type)) => content_type,
                Ok(None) => {
                    return Ok(CallToolResult::error(format!(
                        "Topic {} not found",
                        args.topic_id
                    )))
                }
                Err(result) => return Ok(result),
            },
        };

        let topics = self.ctx.client().topics();
        let mut topic = match topics.get(&content_type, args.topic_id).await {
            Ok(topic) => topic,
            Err(err) => return Ok(failure(&err)),
        };

        if args.include_replies.unwrap_or(true) {
            let replies = match topics
                .replies(&content_type, args.topic_id, &Paging::new())
                .await
            {
                Ok(replies) => replies,
                Err(err) if err.is_not_found() => json!({"result": []}),
                Err(err) => return Ok(failure(&err)),
            };
            if let Some(object) = topic.as_object_mut() {
                object.insert("replies".to_string(), replies);
            }
        }

        self.ctx.render(topic)
    }
}

/// Tool to get a single reply
pub struct GetReplyTool {
    ctx: Arc<ToolContext>,
}

impl GetReplyTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct GetReplyArgs {
    content_type: String,
    topic_id: u64,
    reply_id: u64,
}

#[async_trait::async_trait]
impl Tool for GetReplyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_reply".to_string(),
            description: "Retrieve a single reply to a topic".to_string(),
            input_schema: json_schema_object(
                json!({
                    "content_type": content_type_schema(),
                    "topic_id": json_schema_integer("Numeric ID of the topic"),
                    "reply_id": json_schema_integer("Numeric ID of the reply")
                }),
                vec!["content_type", "topic_id", "reply_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetReplyArgs = parse_args("get_reply", arguments)?;
        self.ctx.respond(
            self.ctx
                .client()
                .topics()
                .reply(&args.content_type, args.topic_id, args.reply_id)
                .await,
        )
    }
}

/// Tool to page through the replies of a topic
pub struct ListRepliesTool {
    ctx: Arc<ToolContext>,
}

impl ListRepliesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct ListRepliesArgs {
    content_type: String,
    topic_id: u64,
    #[serde(flatten)]
    paging: PagingArgs,
}

#[async_trait::async_trait]
impl Tool for ListRepliesTool {
    fn schema(&self) -> ToolSchema {
        let mut props = paging_properties();
        props.insert("content_type".into(), content_type_schema());
        props.insert(
            "topic_id".into(),
            json_schema_integer("Numeric ID of the topic"),
        );

        ToolSchema {
            name: "list_replies".to_string(),
            description: "List replies to a topic, one page at a time".to_string(),
            input_schema: json_schema_object(props.into(), vec!["content_type", "topic_id"]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListRepliesArgs = parse_args("list_replies", arguments)?;
        let paging = Paging::from(args.paging);
        match self
            .ctx
            .client()
            .topics()
            .replies(&args.content_type, args.topic_id, &paging)
            .await
        {
            Err(err) if err.is_not_found() => self.ctx.render(json!({"result": []})),
            result => self.ctx.respond(result),
        }
    }
}

/// Tool to get poll results of a topic
pub struct GetPollResultsTool {
    ctx: Arc<ToolContext>,
}

impl GetPollResultsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Debug, Deserialize)]
struct GetPollArgs {
    content_type: String,
    topic_id: u64,
}

#[async_trait::async_trait]
impl Tool for GetPollResultsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_poll_results".to_string(),
            description: "Retrieve poll options and vote counts attached to a topic".to_string(),
            input_schema: json_schema_object(
                json!({
                    "content_type": content_type_schema(),
                    "topic_id": json_schema_integer("Numeric ID of the topic")
                }),
                vec!["content_type", "topic_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetPollArgs = parse_args("get_poll_results", arguments)?;
        self.ctx.respond(
            self.ctx
                .client()
                .topics()
                .poll(&args.content_type, args.topic_id)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{context_for, json_of, last_query, text_of};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_get(server: &MockServer, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_topics_passes_filters() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/topics", 200, json!({"data": [{"id": 5}]})).await;
        let tool = ListTopicsTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"content_types": ["question"], "created_after": "2025-01-01"}))
            .await
            .unwrap();
        assert_eq!(json_of(&result)["data"][0]["id"], 5);

        let query = last_query(&server).await.unwrap();
        assert!(query.starts_with("content_types=question&created_at="));
    }

    #[tokio::test]
    async fn test_list_ideas_forces_idea_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics"))
            .and(query_param("content_types", "idea"))
            .and(query_param("sort", "voteCount"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"type": "idea"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let tool = ListIdeasTool::new(context_for(&server).await);

        let result = tool.execute(json!({"sort": "voteCount"})).await.unwrap();
        assert_eq!(json_of(&result)["data"][0]["type"], "idea");
    }

    #[tokio::test]
    async fn test_list_content_rejects_unknown_type() {
        let server = MockServer::start().await;
        let tool = ListContentTool::new(context_for(&server).await);

        let result = tool.execute(json!({"content_type": "poll"})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Unknown content type 'poll'"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_topic_attaches_replies() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/questions/42", 200, json!({"id": 42, "title": "Test topic"})).await;
        mount_get(
            &server,
            "/v2/questions/42/replies",
            200,
            json!({"data": [{"id": 100, "body": "Reply"}]}),
        )
        .await;
        let tool = GetTopicTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"topic_id": 42, "content_type": "question"}))
            .await
            .unwrap();
        let topic = json_of(&result);
        assert_eq!(topic["id"], 42);
        assert_eq!(topic["replies"]["data"][0]["id"], 100);
    }

    #[tokio::test]
    async fn test_get_topic_discovers_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/topics"))
            .and(query_param("id", "7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": [{"id": "7", "contentType": "idea"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_get(&server, "/v2/ideas/7", 200, json!({"id": "7", "title": "Dark mode"})).await;
        mount_get(&server, "/v2/ideas/7/replies", 200, json!({"result": [{"id": "1"}]})).await;
        let tool = GetTopicTool::new(context_for(&server).await);

        let topic = json_of(&tool.execute(json!({"topic_id": 7})).await.unwrap());
        assert_eq!(topic["title"], "Dark mode");
        assert_eq!(topic["replies"]["result"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_get_topic_missing_replies_become_empty() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/articles/3", 200, json!({"id": "3"})).await;
        mount_get(&server, "/v2/articles/3/replies", 404, json!({"error": "Not found"})).await;
        let tool = GetTopicTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"topic_id": 3, "content_type": "article"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, None);
        assert_eq!(json_of(&result)["replies"], json!({"result": []}));
    }

    #[tokio::test]
    async fn test_get_topic_unknown_id() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/topics", 200, json!({"result": []})).await;
        let tool = GetTopicTool::new(context_for(&server).await);

        let result = tool.execute(json!({"topic_id": 999})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("Topic 999 not found"));
    }

    #[tokio::test]
    async fn test_get_topic_invalid_type_makes_no_request() {
        let server = MockServer::start().await;
        let tool = GetTopicTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"topic_id": 1, "content_type": "invalid"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: Configuration failure"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_replies_paging_and_missing_topic() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/questions/4/replies", 200, json!({"result": [{"id": "1"}]})).await;
        mount_get(&server, "/v2/questions/5/replies", 404, json!({})).await;
        let tool = ListRepliesTool::new(context_for(&server).await);

        let result = tool
            .execute(json!({"content_type": "question", "topic_id": 4, "page": 2}))
            .await
            .unwrap();
        assert_eq!(json_of(&result)["result"][0]["id"], "1");
        assert_eq!(last_query(&server).await.as_deref(), Some("page=2"));

        let result = tool
            .execute(json!({"content_type": "question", "topic_id": 5}))
            .await
            .unwrap();
        assert_eq!(result.is_error, None);
        assert_eq!(json_of(&result), json!({"result": []}));
    }

    #[tokio::test]
    async fn test_reply_and_poll() {
        let server = MockServer::start().await;
        mount_get(&server, "/v2/questions/4/replies/8", 200, json!({"id": "8"})).await;
        mount_get(&server, "/v2/conversations/4/poll", 200, json!({"votes": 3})).await;
        let ctx = context_for(&server).await;

        let reply = GetReplyTool::new(ctx.clone())
            .execute(json!({"content_type": "question", "topic_id": 4, "reply_id": 8}))
            .await
            .unwrap();
        assert_eq!(json_of(&reply)["id"], "8");

        let poll = GetPollResultsTool::new(ctx)
            .execute(json!({"content_type": "conversation", "topic_id": 4}))
            .await
            .unwrap();
        assert_eq!(json_of(&poll)["votes"], 3);
    }
}
