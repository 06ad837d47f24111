// Taxonomy tools: tags, moderator tags and idea enumerations

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_object, paging_properties, parse_args, PagingArgs, Tool, ToolContext,
};
use anyhow::Result;
use gscc_sdk::Paging;
use serde_json::{json, Value};
use std::sync::Arc;

/// Tool to list public tags
pub struct ListTagsTool {
    ctx: Arc<ToolContext>,
}

impl ListTagsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListTagsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_tags".to_string(),
            description: "List public tags used on community content".to_string(),
            input_schema: json_schema_object(paging_properties().into(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: PagingArgs = parse_args("list_tags", arguments)?;
        let paging = Paging::from(args);
        self.ctx.respond(self.ctx.client().tags().list(&paging).await)
    }
}

/// Tool to list moderator-only tags
pub struct ListModeratorTagsTool {
    ctx: Arc<ToolContext>,
}

impl ListModeratorTagsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListModeratorTagsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_moderator_tags".to_string(),
            description: "List moderator tags used for internal classification".to_string(),
            input_schema: json_schema_object(paging_properties().into(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: PagingArgs = parse_args("list_moderator_tags", arguments)?;
        let paging = Paging::from(args);
        self.ctx
            .respond(self.ctx.client().tags().moderator(&paging).await)
    }
}

/// Tool to list idea statuses
pub struct ListIdeaStatusesTool {
    ctx: Arc<ToolContext>,
}

impl ListIdeaStatusesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListIdeaStatusesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_idea_statuses".to_string(),
            description: "List the workflow statuses an idea can have".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        self.ctx.respond(self.ctx.client().ideas().statuses().await)
    }
}

/// Tool to list product areas
pub struct ListProductAreasTool {
    ctx: Arc<ToolContext>,
}

impl ListProductAreasTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ListProductAreasTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_product_areas".to_string(),
            description: "List product areas that ideas can be filed under".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        self.ctx
            .respond(self.ctx.client().ideas().product_areas().await)
    }
}
