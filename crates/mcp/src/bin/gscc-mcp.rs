// Standalone MCP server binary

use anyhow::Result;
use gscc_mcp::server::McpServer;
use gscc_mcp::tools::{register_all, ToolContext, ToolRegistry};
use gscc_mcp::ServerConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Gainsight CC MCP server starting...");

    let config = ServerConfig::from_env()?;
    let client = config.build_client()?;
    tracing::info!(
        region = %client.region(),
        base_url = %client.base_url(),
        "Community client ready"
    );

    let ctx = Arc::new(ToolContext::new(client, config.link_resolver()?));

    let mut registry = ToolRegistry::new();
    register_all(&mut registry, ctx);

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
