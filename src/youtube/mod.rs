//! YouTube Data API abstraction.
//!
//! Provides a trait-based interface over the handful of remote endpoints the
//! playlist tools need, with an HTTP implementation and an in-memory one.

mod http;
mod memory;
pub mod models;

pub use http::HttpYoutubeApi;
pub use memory::{ApiCall, MemoryYoutubeApi};
pub use models::{
    PlaylistItemListResponse, PlaylistItemResource, PlaylistListResponse, PlaylistResource,
    PrivacyStatus, SearchListResponse,
};

use crate::error::Result;
use async_trait::async_trait;

/// Largest `maxResults` any list endpoint accepts.
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// The "Music" video category.
pub const MUSIC_CATEGORY_ID: &str = "10";

/// Resource type a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Video,
    Playlist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Video => "video",
            SearchKind::Playlist => "playlist",
        }
    }
}

/// Parameters of a `search.list` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub kind: SearchKind,
    pub max_results: u32,
    pub video_category_id: Option<String>,
}

/// Selector for a `playlists.list` call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistQuery {
    /// A single playlist by id.
    ById(String),
    /// Playlists owned by the authenticated user.
    Mine { max_results: u32 },
}

/// Trait for YouTube Data API implementations.
///
/// Every method issues exactly one remote call.
#[async_trait]
pub trait YoutubeApi: Send + Sync {
    /// `search.list`
    async fn search(&self, request: &SearchRequest) -> Result<SearchListResponse>;

    /// `playlists.insert`
    async fn insert_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource>;

    /// `playlists.list` with `snippet,contentDetails,status` parts.
    async fn list_playlists(&self, query: &PlaylistQuery) -> Result<PlaylistListResponse>;

    /// `playlists.update` with `snippet,status` parts.
    async fn update_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource>;

    /// `playlists.delete`
    async fn delete_playlist(&self, playlist_id: &str) -> Result<()>;

    /// `playlistItems.insert` for a single video.
    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<PlaylistItemResource>;

    /// `playlistItems.list`, one page.
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse>;
}
