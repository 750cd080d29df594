//! In-memory YouTube API implementation.
//!
//! Useful for testing and offline experiments. Records every call so that
//! callers can assert on ordering and call counts.

use super::models::{
    PlaylistContentDetails, PlaylistItemListResponse, PlaylistItemResource, PlaylistItemSnippet,
    PlaylistListResponse, PlaylistResource, PlaylistSnippet, PlaylistStatus, PrivacyStatus,
    ResourceId, SearchListResponse, SearchResult, SearchSnippet,
};
use super::{PlaylistQuery, SearchKind, SearchRequest, YoutubeApi};
use crate::error::{Result, YtMusicError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// A remote call observed by [`MemoryYoutubeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Search { query: String, max_results: u32 },
    InsertPlaylist { title: String },
    ListPlaylists,
    UpdatePlaylist { playlist_id: String },
    DeletePlaylist { playlist_id: String },
    InsertItem { playlist_id: String, video_id: String },
    ListItems { playlist_id: String, page_token: Option<String> },
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    id: String,
    title: String,
    channel_title: String,
    kind: SearchKind,
}

#[derive(Debug, Clone)]
struct StoredPlaylist {
    id: String,
    title: String,
    description: String,
    privacy: PrivacyStatus,
    video_ids: Vec<String>,
}

#[derive(Default)]
struct MemoryState {
    catalog: Vec<CatalogEntry>,
    playlists: Vec<StoredPlaylist>,
    failing_searches: Vec<String>,
    rejected_videos: HashSet<String>,
    failing_page_tokens: HashSet<String>,
    page_size: Option<usize>,
    next_id: u64,
    calls: Vec<ApiCall>,
}

/// In-memory YouTube API.
pub struct MemoryYoutubeApi {
    state: Mutex<MemoryState>,
}

impl MemoryYoutubeApi {
    /// Create an empty in-memory API.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a searchable track. A search matches when its query contains the
    /// title, ignoring case.
    pub fn add_track(&self, video_id: &str, title: &str, channel_title: &str) {
        self.state().catalog.push(CatalogEntry {
            id: video_id.to_string(),
            title: title.to_string(),
            channel_title: channel_title.to_string(),
            kind: SearchKind::Video,
        });
    }

    /// Add a search result that has no video id.
    pub fn add_track_without_id(&self, title: &str, channel_title: &str) {
        self.add_track("", title, channel_title);
    }

    /// Add a playlist owned by the authenticated user.
    pub fn add_playlist(&self, playlist_id: &str, title: &str, video_ids: &[&str]) {
        let mut state = self.state();
        state.catalog.push(CatalogEntry {
            id: playlist_id.to_string(),
            title: title.to_string(),
            channel_title: "me".to_string(),
            kind: SearchKind::Playlist,
        });
        state.playlists.push(StoredPlaylist {
            id: playlist_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            privacy: PrivacyStatus::Private,
            video_ids: video_ids.iter().map(|v| v.to_string()).collect(),
        });
    }

    /// Make every search whose query contains `needle` fail.
    pub fn fail_searches_containing(&self, needle: &str) {
        self.state().failing_searches.push(needle.to_lowercase());
    }

    /// Make item inserts of `video_id` fail.
    pub fn reject_video(&self, video_id: &str) {
        self.state().rejected_videos.insert(video_id.to_string());
    }

    /// Make item listing fail when asked for the page behind `token`.
    pub fn fail_page_token(&self, token: &str) {
        self.state().failing_page_tokens.insert(token.to_string());
    }

    /// Serve at most `size` playlist items per page, regardless of `maxResults`.
    pub fn set_page_size(&self, size: usize) {
        self.state().page_size = Some(size);
    }

    /// Video ids currently stored in a playlist.
    pub fn playlist_video_ids(&self, playlist_id: &str) -> Option<Vec<String>> {
        self.state()
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .map(|p| p.video_ids.clone())
    }

    /// All calls issued so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    /// Number of issued calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Default for MemoryYoutubeApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(playlist_id: &str) -> YtMusicError {
    YtMusicError::Api {
        status: 404,
        message: format!("Playlist {} cannot be found", playlist_id),
    }
}

fn to_resource(playlist: &StoredPlaylist) -> PlaylistResource {
    PlaylistResource {
        id: Some(playlist.id.clone()),
        snippet: Some(PlaylistSnippet {
            title: playlist.title.clone(),
            description: Some(playlist.description.clone()),
            channel_title: Some("me".to_string()),
            ..Default::default()
        }),
        status: Some(PlaylistStatus {
            privacy_status: Some(playlist.privacy),
        }),
        content_details: Some(PlaylistContentDetails {
            item_count: playlist.video_ids.len() as u32,
        }),
    }
}

#[async_trait]
impl YoutubeApi for MemoryYoutubeApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchListResponse> {
        let mut state = self.state();
        state.calls.push(ApiCall::Search {
            query: request.query.clone(),
            max_results: request.max_results,
        });

        let query = request.query.to_lowercase();
        if state.failing_searches.iter().any(|n| query.contains(n.as_str())) {
            return Err(YtMusicError::Api {
                status: 403,
                message: "quotaExceeded".to_string(),
            });
        }

        let items = state
            .catalog
            .iter()
            .filter(|e| e.kind == request.kind && query.contains(&e.title.to_lowercase()))
            .take(request.max_results as usize)
            .map(|e| {
                let id = (!e.id.is_empty()).then(|| e.id.clone());
                SearchResult {
                    id: ResourceId {
                        video_id: if e.kind == SearchKind::Video { id.clone() } else { None },
                        playlist_id: if e.kind == SearchKind::Playlist { id } else { None },
                        ..Default::default()
                    },
                    snippet: SearchSnippet {
                        title: Some(e.title.clone()),
                        channel_title: Some(e.channel_title.clone()),
                        channel_id: Some(format!("UC{}", e.channel_title.len())),
                        description: Some(format!("{} by {}", e.title, e.channel_title)),
                        ..Default::default()
                    },
                }
            })
            .collect();

        Ok(SearchListResponse {
            items,
            next_page_token: None,
        })
    }

    async fn insert_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource> {
        let mut state = self.state();
        let snippet = playlist.snippet.clone().unwrap_or_default();
        state.calls.push(ApiCall::InsertPlaylist {
            title: snippet.title.clone(),
        });

        if snippet.title.trim().is_empty() {
            return Err(YtMusicError::Api {
                status: 400,
                message: "Playlist title is required".to_string(),
            });
        }

        state.next_id += 1;
        let stored = StoredPlaylist {
            id: format!("PLmem{}", state.next_id),
            title: snippet.title,
            description: snippet.description.unwrap_or_default(),
            privacy: playlist
                .status
                .as_ref()
                .and_then(|s| s.privacy_status)
                .unwrap_or_default(),
            video_ids: Vec::new(),
        };
        let resource = to_resource(&stored);
        state.playlists.push(stored);
        Ok(resource)
    }

    async fn list_playlists(&self, query: &PlaylistQuery) -> Result<PlaylistListResponse> {
        let mut state = self.state();
        state.calls.push(ApiCall::ListPlaylists);

        let items = match query {
            PlaylistQuery::ById(id) => state
                .playlists
                .iter()
                .filter(|p| &p.id == id)
                .map(to_resource)
                .collect(),
            PlaylistQuery::Mine { max_results } => state
                .playlists
                .iter()
                .take(*max_results as usize)
                .map(to_resource)
                .collect(),
        };

        Ok(PlaylistListResponse {
            items,
            next_page_token: None,
        })
    }

    async fn update_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource> {
        let mut state = self.state();
        let playlist_id = playlist.id.clone().unwrap_or_default();
        state.calls.push(ApiCall::UpdatePlaylist {
            playlist_id: playlist_id.clone(),
        });

        let stored = state
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| not_found(&playlist_id))?;

        if let Some(snippet) = &playlist.snippet {
            stored.title = snippet.title.clone();
            stored.description = snippet.description.clone().unwrap_or_default();
        }
        if let Some(privacy) = playlist.status.as_ref().and_then(|s| s.privacy_status) {
            stored.privacy = privacy;
        }
        Ok(to_resource(stored))
    }

    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(ApiCall::DeletePlaylist {
            playlist_id: playlist_id.to_string(),
        });

        let before = state.playlists.len();
        state.playlists.retain(|p| p.id != playlist_id);
        if state.playlists.len() == before {
            return Err(not_found(playlist_id));
        }
        Ok(())
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<PlaylistItemResource> {
        let mut state = self.state();
        state.calls.push(ApiCall::InsertItem {
            playlist_id: playlist_id.to_string(),
            video_id: video_id.to_string(),
        });

        if state.rejected_videos.contains(video_id) {
            return Err(YtMusicError::Api {
                status: 404,
                message: format!("Video not found: {}", video_id),
            });
        }

        let playlist = state
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| not_found(playlist_id))?;
        playlist.video_ids.push(video_id.to_string());
        let position = (playlist.video_ids.len() - 1) as u32;

        Ok(PlaylistItemResource {
            id: Some(format!("{}-{}", playlist_id, position)),
            snippet: PlaylistItemSnippet {
                playlist_id: Some(playlist_id.to_string()),
                position: Some(position),
                resource_id: Some(ResourceId::video(video_id)),
                ..Default::default()
            },
        })
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse> {
        let mut state = self.state();
        state.calls.push(ApiCall::ListItems {
            playlist_id: playlist_id.to_string(),
            page_token: page_token.map(str::to_string),
        });

        if page_token.is_some_and(|t| state.failing_page_tokens.contains(t)) {
            return Err(YtMusicError::Api {
                status: 500,
                message: "Backend error".to_string(),
            });
        }

        // Page tokens are stringified offsets.
        let offset = match page_token {
            Some(token) => token.parse::<usize>().map_err(|_| YtMusicError::Api {
                status: 400,
                message: format!("Invalid page token: {}", token),
            })?,
            None => 0,
        };

        let page_size = state
            .page_size
            .map_or(max_results as usize, |size| size.min(max_results as usize));

        let playlist = state
            .playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| not_found(playlist_id))?;

        let items = playlist
            .video_ids
            .iter()
            .enumerate()
            .skip(offset)
            .take(page_size)
            .map(|(position, video_id)| {
                let entry = state.catalog.iter().find(|e| &e.id == video_id);
                PlaylistItemResource {
                    id: Some(format!("{}-{}", playlist_id, position)),
                    snippet: PlaylistItemSnippet {
                        playlist_id: Some(playlist_id.to_string()),
                        title: Some(entry.map_or_else(|| video_id.clone(), |e| e.title.clone())),
                        position: Some(position as u32),
                        resource_id: Some(ResourceId::video(video_id)),
                        video_owner_channel_title: entry.map(|e| e.channel_title.clone()),
                        ..Default::default()
                    },
                }
            })
            .collect();

        let next_offset = offset + page_size;
        let next_page_token =
            (next_offset < playlist.video_ids.len()).then(|| next_offset.to_string());

        Ok(PlaylistItemListResponse {
            items,
            next_page_token,
        })
    }
}
