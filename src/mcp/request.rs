//! Typed tool-call arguments.

use super::tools::TOOL_NAMES;
use crate::error::{Result, YtMusicError};
use crate::music::{normalize_playlist_id, PrivacyStatus, SearchFilter, MAX_SEARCH_LIMIT};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub filter: SearchFilter,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePlaylistArgs {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub privacy_status: PrivacyStatus,
    #[serde(default)]
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddTracksArgs {
    pub playlist_id: String,
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchAndAddArgs {
    pub playlist_id: String,
    #[serde(alias = "queries")]
    pub search_queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistDetailsArgs {
    pub playlist_id: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LibraryArgs {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatePlaylistArgs {
    pub playlist_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeletePlaylistArgs {
    pub playlist_id: String,
}

/// A tool call, keyed by tool name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolRequest {
    SearchYoutubeMusic(SearchArgs),
    CreateYoutubeMusicPlaylist(CreatePlaylistArgs),
    AddTracksToPlaylist(AddTracksArgs),
    SearchAndAddToPlaylist(SearchAndAddArgs),
    GetPlaylistDetails(PlaylistDetailsArgs),
    GetLibraryPlaylists(LibraryArgs),
    UpdatePlaylist(UpdatePlaylistArgs),
    DeletePlaylist(DeletePlaylistArgs),
}

impl ToolRequest {
    /// Parse and validate a `tools/call` name and its arguments.
    pub fn parse(name: &str, arguments: Option<Value>) -> Result<Self> {
        if !TOOL_NAMES.contains(&name) {
            return Err(YtMusicError::InvalidInput(format!("Unknown tool: {}", name)));
        }

        let arguments = match arguments {
            None | Some(Value::Null) => json!({}),
            Some(args) => args,
        };
        let request: Self = serde_json::from_value(json!({ "name": name, "arguments": arguments }))
            .map_err(|e| {
                YtMusicError::InvalidInput(format!("Invalid arguments for {}: {}", name, e))
            })?;
        request.validate()
    }

    /// Check value ranges and normalize playlist ids.
    pub fn validate(self) -> Result<Self> {
        Ok(match self {
            Self::SearchYoutubeMusic(args) => {
                require("query", &args.query)?;
                if let Some(limit) = args.limit {
                    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
                        return Err(YtMusicError::InvalidInput(format!(
                            "limit must be between 1 and {}, got {}",
                            MAX_SEARCH_LIMIT, limit
                        )));
                    }
                }
                Self::SearchYoutubeMusic(args)
            }
            Self::CreateYoutubeMusicPlaylist(args) => {
                require("title", &args.title)?;
                Self::CreateYoutubeMusicPlaylist(args)
            }
            Self::AddTracksToPlaylist(args) => Self::AddTracksToPlaylist(AddTracksArgs {
                playlist_id: playlist_id(&args.playlist_id)?,
                ..args
            }),
            Self::SearchAndAddToPlaylist(args) => {
                Self::SearchAndAddToPlaylist(SearchAndAddArgs {
                    playlist_id: playlist_id(&args.playlist_id)?,
                    ..args
                })
            }
            Self::GetPlaylistDetails(args) => Self::GetPlaylistDetails(PlaylistDetailsArgs {
                playlist_id: playlist_id(&args.playlist_id)?,
                ..args
            }),
            Self::GetLibraryPlaylists(args) => {
                if args.limit == Some(0) {
                    return Err(YtMusicError::InvalidInput(
                        "limit must be at least 1".to_string(),
                    ));
                }
                Self::GetLibraryPlaylists(args)
            }
            Self::UpdatePlaylist(args) => Self::UpdatePlaylist(UpdatePlaylistArgs {
                playlist_id: playlist_id(&args.playlist_id)?,
                ..args
            }),
            Self::DeletePlaylist(args) => Self::DeletePlaylist(DeletePlaylistArgs {
                playlist_id: playlist_id(&args.playlist_id)?,
            }),
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(YtMusicError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn playlist_id(raw: &str) -> Result<String> {
    require("playlist_id", raw)?;
    Ok(normalize_playlist_id(raw))
}
