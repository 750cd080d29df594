//! MCP (Model Context Protocol) server for YouTube playlist management.
//!
//! Lets AI assistants search YouTube and manage the user's playlists.
//! Implements JSON-RPC 2.0 over stdio, and over HTTP via the `serve` command.

mod protocol;
mod render;
mod request;
mod server;
mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use request::ToolRequest;
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::TOOL_NAMES;
