//! End-to-end tests of the MCP HTTP transport over an in-memory YouTube API.

use serde_json::{json, Value};
use std::sync::Arc;
use ytmusic_mcp::cli::commands::router;
use ytmusic_mcp::config::ApiSettings;
use ytmusic_mcp::mcp::McpServer;
use ytmusic_mcp::music::MusicClient;
use ytmusic_mcp::youtube::MemoryYoutubeApi;

async fn spawn(api: Arc<MemoryYoutubeApi>) -> String {
    let client = Arc::new(MusicClient::new(api));
    let server = Arc::new(McpServer::new(client, ApiSettings::default()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(server)).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn rpc(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/mcp", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn call_tool(base: &str, name: &str, arguments: Value) -> String {
    let response: Value = rpc(
        base,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    response["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let base = spawn(Arc::new(MemoryYoutubeApi::new())).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok", "service": "ytmusic-mcp" }));
}

#[tokio::test]
async fn test_notification_is_accepted_without_body() {
    let base = spawn(Arc::new(MemoryYoutubeApi::new())).await;

    let response = rpc(
        &base,
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_playlist_workflow() {
    let api = Arc::new(MemoryYoutubeApi::new());
    api.add_track("abc123", "Hallogallo", "NEU! - Topic");
    api.add_track("e2e4", "E2-E4", "Manuel Göttsching");
    let base = spawn(api.clone()).await;

    let text = call_tool(&base, "create_youtube_music_playlist", json!({ "title": "Kraut" })).await;
    assert!(text.contains("Playlist ID: PLmem1"));

    let text = call_tool(
        &base,
        "search_and_add_to_playlist",
        json!({
            "playlist_id": "PLmem1",
            "search_queries": ["Neu! Hallogallo", "Göttsching E2-E4", "zzqq"]
        }),
    )
    .await;
    assert!(text.starts_with("Added 2 tracks to playlist:"));
    assert!(text.ends_with("Failed to find: zzqq"));

    let text = call_tool(
        &base,
        "update_playlist",
        json!({ "playlist_id": "PLmem1", "description": "Motorik" }),
    )
    .await;
    assert_eq!(text, "Updated playlist: Kraut\nPlaylist ID: PLmem1\nDescription: Motorik");

    let text = call_tool(
        &base,
        "get_playlist_details",
        json!({ "playlist_id": "https://www.youtube.com/playlist?list=PLmem1", "limit": 1 }),
    )
    .await;
    assert!(text.contains("Track Count: 2"));
    assert!(text.contains("  - Hallogallo - NEU! - Topic"));
    assert!(!text.contains("E2-E4 - "));

    let text = call_tool(&base, "delete_playlist", json!({ "playlist_id": "PLmem1" })).await;
    assert_eq!(text, "Deleted playlist: PLmem1");

    let text = call_tool(&base, "get_library_playlists", json!({})).await;
    assert_eq!(text, "No playlists found in your library.");
}
