// MCP server: newline-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use futures_util::StreamExt;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "gainsight-cc";

/// Longest accepted request line; longer lines are discarded.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

const INSTRUCTIONS: &str =
    "Search and retrieve content from Gainsight Customer Communities (formerly inSided).";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve on the process stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.registry.len(), "MCP server started");
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_BYTES));

        while let Some(line) = lines.next().await {
            let response = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(&line).await,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!(limit = MAX_LINE_BYTES, "Request line too long, discarded");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::invalid_request()))
                }
                Err(LinesCodecError::Io(e)) => return Err(e.into()),
            };

            if let Some(response) = response {
                let mut bytes = serde_json::to_vec(&response)?;
                bytes.push(b'\n');
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one protocol line; notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Unparseable request");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        // Echo whatever id can be recovered from a malformed request
        let request: JsonRpcRequest = match serde_json::from_value(message.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid request");
                let id = message.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };
        to_value(&result)
    }

    fn list_tools(&self) -> Result<Value, JsonRpcError> {
        to_value(&ListToolsResult {
            tools: self.registry.list_schemas(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool call params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        debug!(tool = %params.name, "Calling tool");
        let result = tool
            .execute(params.arguments)
            .await
            .map_err(|e| JsonRpcError::invalid_params(format!("{:#}", e)))?;
        to_value(&result)
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
