//! MCP over HTTP.
//!
//! `POST /mcp` takes one JSON-RPC message per request; `GET /health` is a
//! liveness probe.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::{McpServer, SERVER_NAME};
use crate::music::MusicClient;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Run the HTTP server.
pub async fn run_serve(host: Option<&str>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let client = MusicClient::connect(&settings).await?;
    let server = Arc::new(McpServer::new(Arc::new(client), settings.api.clone()));

    let host = host.unwrap_or(&settings.server.host);
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP transport listening on {}", addr);

    Output::header("ytmusic-mcp HTTP Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("MCP", "POST /mcp");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(server)).await?;

    Ok(())
}

/// Routes for the HTTP transport.
pub fn router(server: Arc<McpServer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .layer(cors)
        .with_state(server)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": SERVER_NAME }))
}

async fn mcp(State(server): State<Arc<McpServer>>, body: String) -> Response {
    match server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
