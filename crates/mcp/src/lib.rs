// MCP (Model Context Protocol) server for Gainsight Customer Communities.
// Exposes community search and retrieval to agent clients as tools.

pub mod config;
pub mod links;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::McpServer;
