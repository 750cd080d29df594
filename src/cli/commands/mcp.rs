//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::music::MusicClient;
use anyhow::Result;
use std::sync::Arc;

/// Run the MCP server on stdio.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let client = MusicClient::connect(&settings).await?;
    let server = McpServer::new(Arc::new(client), settings.api.clone());
    server.run().await
}
