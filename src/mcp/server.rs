//! MCP server implementation.

use super::protocol::*;
use super::render;
use super::request::ToolRequest;
use super::tools::get_tools;
use crate::config::ApiSettings;
use crate::error::Result;
use crate::music::MusicClient;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "ytmusic-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server exposing the playlist tools.
///
/// Holds no per-session state, so one instance can serve the stdio loop and
/// any number of HTTP requests.
pub struct McpServer {
    client: Arc<MusicClient>,
    api: ApiSettings,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(client: Arc<MusicClient>, api: ApiSettings) -> Self {
        Self { client, api }
    }

    /// Run the MCP server over stdio, one JSON-RPC message per line.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("MCP server running on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw JSON-RPC message. Notifications produce no response.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!("Notification: {}", request.method);
            return None;
        };
        let id = Some(id);

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                &format!("Unsupported JSON-RPC version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => respond(id, &ToolsListResult { tools: get_tools() }),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };
        respond(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = match self.call_tool(&params.name, params.arguments).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                error!("Tool {} failed: {}", params.name, e);
                ToolCallResult::error(format!("Error: {}", e))
            }
        };
        respond(id, &result)
    }

    /// Run a tool and render its result as text.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<String> {
        let request = ToolRequest::parse(name, arguments)?;
        debug!("Calling tool {:?}", request);

        let text = match request {
            ToolRequest::SearchYoutubeMusic(args) => {
                let limit = args.limit.unwrap_or(self.api.search_limit);
                let tracks = self.client.search(&args.query, limit, args.filter).await?;
                render::search_results(&tracks)
            }
            ToolRequest::CreateYoutubeMusicPlaylist(args) => {
                let created = self
                    .client
                    .create_playlist(
                        &args.title,
                        &args.description,
                        args.privacy_status,
                        &args.video_ids,
                    )
                    .await?;
                render::created_playlist(&created)
            }
            ToolRequest::AddTracksToPlaylist(args) => {
                let outcome = self.client.add_items(&args.playlist_id, &args.video_ids).await?;
                render::added_items(&outcome)
            }
            ToolRequest::SearchAndAddToPlaylist(args) => {
                let result = self
                    .client
                    .search_and_add(&args.playlist_id, &args.search_queries)
                    .await;
                render::batch_result(&result)
            }
            ToolRequest::GetPlaylistDetails(args) => {
                let playlist = self.client.get_playlist(&args.playlist_id, args.limit).await?;
                render::playlist_details(&playlist)
            }
            ToolRequest::GetLibraryPlaylists(args) => {
                let limit = args.limit.unwrap_or(self.api.library_limit);
                let playlists = self.client.list_owned_playlists(limit).await?;
                render::library_playlists(&playlists)
            }
            ToolRequest::UpdatePlaylist(args) => {
                let updated = self
                    .client
                    .update_playlist(
                        &args.playlist_id,
                        args.title.as_deref(),
                        args.description.as_deref(),
                    )
                    .await?;
                render::updated_playlist(&updated)
            }
            ToolRequest::DeletePlaylist(args) => {
                let deleted = self.client.delete_playlist(&args.playlist_id).await?;
                render::deleted_playlist(&deleted)
            }
        };
        Ok(text)
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &format!("Serialization failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::MemoryYoutubeApi;

    fn server() -> (Arc<MemoryYoutubeApi>, McpServer) {
        let api = Arc::new(MemoryYoutubeApi::new());
        let client = Arc::new(MusicClient::new(api.clone()));
        (api, McpServer::new(client, ApiSettings::default()))
    }

    async fn call(server: &McpServer, name: &str, arguments: Value) -> (String, bool) {
        let raw = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        let response = server.handle_message(&raw.to_string()).await.unwrap();
        let result = response.result.unwrap();
        let text = result["content"][0]["text"].as_str().unwrap().to_string();
        (text, result["isError"] == json!(true))
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let (_, server) = server();

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, Some(json!("a")));
        assert_eq!(response.result.unwrap()["tools"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let (_, server) = server();

        let response = server.handle_message("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let (_, server) = server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_search_and_add_tool() {
        let (api, server) = server();
        api.add_track("abc123", "Hallogallo", "NEU! - Topic");
        api.add_playlist("PL1", "Kraut", &[]);

        let (text, is_error) = call(
            &server,
            "search_and_add_to_playlist",
            json!({
                "playlist_id": "https://www.youtube.com/playlist?list=PL1",
                "search_queries": ["Neu! Hallogallo", "zzqq nonexistent"]
            }),
        )
        .await;

        assert!(!is_error);
        assert!(text.starts_with("Added 1 tracks to playlist:"));
        assert!(text.contains("Neu! Hallogallo -> Hallogallo by NEU! - Topic"));
        assert!(text.ends_with("Failed to find: zzqq nonexistent"));
        assert_eq!(api.playlist_video_ids("PL1"), Some(vec!["abc123".to_string()]));
    }

    #[tokio::test]
    async fn test_tool_errors_are_text() {
        let (_, server) = server();

        let (text, is_error) = call(&server, "delete_playlist", json!({ "playlist_id": "PLX" })).await;
        assert!(is_error);
        assert!(text.starts_with("Error: Failed to delete playlist: PLX"));

        let (text, is_error) = call(&server, "get_playlist_details", json!({ "playlist_id": "PLX" })).await;
        assert!(is_error);
        assert_eq!(text, "Error: Playlist not found: PLX");

        let (text, _) = call(&server, "search_youtube_music", json!({ "query": "x", "limit": 500 })).await;
        assert!(text.starts_with("Error: Invalid input: limit must be between 1 and 100"));

        let (text, _) = call(&server, "no_such_tool", json!({})).await;
        assert_eq!(text, "Error: Invalid input: Unknown tool: no_such_tool");
    }

    #[tokio::test]
    async fn test_search_uses_configured_default_limit() {
        let (api, server) = server();
        call(&server, "search_youtube_music", json!({ "query": "anything" })).await;

        assert_eq!(
            api.calls(),
            vec![crate::youtube::ApiCall::Search {
                query: "anything music".to_string(),
                max_results: 20,
            }]
        );
    }

    #[tokio::test]
    async fn test_create_then_details() {
        let (_, server) = server();

        let (text, _) = call(
            &server,
            "create_youtube_music_playlist",
            json!({ "title": "Kraut", "video_ids": ["v1", "v2"] }),
        )
        .await;
        assert_eq!(
            text,
            "Created playlist: Kraut\nPlaylist ID: PLmem1\nURL: https://www.youtube.com/playlist?list=PLmem1"
        );

        let (text, _) = call(&server, "get_playlist_details", json!({ "playlist_id": "PLmem1" })).await;
        assert!(text.contains("Track Count: 2"));

        let (text, _) = call(&server, "get_library_playlists", json!({})).await;
        assert!(text.contains("Kraut (2 tracks)"));
    }
}
