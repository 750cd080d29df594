//! Error types for ytmusic-mcp.

use thiserror::Error;

/// Library-level error type for playlist and search operations.
#[derive(Error, Debug)]
pub enum YtMusicError {
    #[error("Search failed: {0}")]
    Search(String),

    #[error("Failed to create playlist: {0}")]
    PlaylistCreate(String),

    #[error("Failed to add tracks: {0}")]
    AddItems(String),

    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("Failed to update playlist: {0}")]
    Update(String),

    #[error("Failed to delete playlist: {0}")]
    Delete(String),

    #[error("Failed to retrieve playlist: {0}")]
    Retrieval(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl YtMusicError {
    /// HTTP status reported by the remote API, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            YtMusicError::Api { status, .. } => Some(*status),
            YtMusicError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for ytmusic-mcp operations.
pub type Result<T> = std::result::Result<T, YtMusicError>;
