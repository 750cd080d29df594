//! Music and playlist operations on top of the YouTube Data API.
//!
//! [`MusicClient`] normalizes raw API resources into the stable shapes below.
//! Nothing here is persisted; every value lives for one tool response.

mod batch;
mod client;
mod pager;

pub use client::MusicClient;

pub use crate::youtube::models::Thumbnails;
pub use crate::youtube::PrivacyStatus;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Largest `limit` a search tool call may ask for.
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// An artist credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A track as returned by search or playlist listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Required for playlist operations, but not guaranteed by the API.
    pub video_id: Option<String>,
    pub title: String,
    pub artists: Vec<Artist>,
    pub album: Option<String>,
    pub duration: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub published_at: Option<DateTime<Utc>>,
    /// First 200 characters of the description (search results only).
    pub description: Option<String>,
    /// Position in the playlist (playlist listings only).
    pub position: Option<u32>,
}

impl Track {
    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }
}

/// A playlist with its (possibly capped) track list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub privacy: Option<PrivacyStatus>,
    /// Authoritative item count from the playlist metadata.
    pub track_count: u32,
    pub tracks: Vec<Track>,
    /// Set when a retrieval cap stopped the walk while items remained.
    pub truncated: bool,
}

/// What kind of content a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    #[default]
    Songs,
    Videos,
    Albums,
    Artists,
    Playlists,
}

impl std::str::FromStr for SearchFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "songs" => Ok(SearchFilter::Songs),
            "videos" => Ok(SearchFilter::Videos),
            "albums" => Ok(SearchFilter::Albums),
            "artists" => Ok(SearchFilter::Artists),
            "playlists" => Ok(SearchFilter::Playlists),
            _ => Err(format!("Unknown search filter: {}", s)),
        }
    }
}

impl std::fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFilter::Songs => write!(f, "songs"),
            SearchFilter::Videos => write!(f, "videos"),
            SearchFilter::Albums => write!(f, "albums"),
            SearchFilter::Artists => write!(f, "artists"),
            SearchFilter::Playlists => write!(f, "playlists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlaylist {
    pub playlist_id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsOutcome {
    pub playlist_id: String,
    pub added_count: usize,
    pub requested_count: usize,
    pub failed_video_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub playlist_id: String,
    pub title: String,
    pub description: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedPlaylist {
    pub playlist_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPlaylist {
    pub playlist_id: String,
    pub deleted: bool,
}

/// A query that resolved to a track in a batch search-and-add.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedTrack {
    pub query: String,
    pub matched: String,
    pub artists: Vec<String>,
    pub video_id: String,
}

/// Outcome of a batch search-and-add.
///
/// `added_count == added_tracks.len()` and every input query lands in exactly
/// one of `added_tracks` / `failed_queries`, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Number of queries that resolved to a track.
    pub added_count: usize,
    /// Number of resolved tracks the playlist service accepted.
    pub confirmed_count: usize,
    pub added_tracks: Vec<AddedTrack>,
    pub failed_queries: Vec<String>,
}

/// Public URL of a playlist.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

static PLAYLIST_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]list=([a-zA-Z0-9_-]+)").expect("Invalid regex")
});

/// Accept either a bare playlist id or any URL carrying a `list=` parameter.
pub fn normalize_playlist_id(input: &str) -> String {
    let input = input.trim();
    PLAYLIST_URL_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}
