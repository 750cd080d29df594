//! Typed adapter over the YouTube Data API.

use super::pager::collect_tracks;
use super::{
    playlist_url, AddItemsOutcome, Artist, CreatedPlaylist, DeletedPlaylist, Playlist,
    PlaylistSummary, PrivacyStatus, SearchFilter, Track, UpdatedPlaylist,
};
use crate::auth::Credentials;
use crate::config::Settings;
use crate::error::{Result, YtMusicError};
use crate::youtube::models::{PlaylistResource, PlaylistSnippet, PlaylistStatus, SearchResult};
use crate::youtube::{
    HttpYoutubeApi, PlaylistQuery, SearchKind, SearchRequest, YoutubeApi, MAX_RESULTS_PER_PAGE,
    MUSIC_CATEGORY_ID,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Music operations against a YouTube account.
///
/// Each operation issues one remote call unless documented otherwise, and
/// all calls are awaited one after another.
pub struct MusicClient {
    api: Arc<dyn YoutubeApi>,
}

impl MusicClient {
    /// Create a client over an existing API implementation.
    pub fn new(api: Arc<dyn YoutubeApi>) -> Self {
        Self { api }
    }

    /// Load credentials, refresh them if needed, and connect to the HTTP API.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let mut credentials = Credentials::load(&settings.auth, &settings.token_file())?;
        credentials.ensure_fresh(&reqwest::Client::new()).await?;
        info!("Loaded YouTube credentials from {}", credentials.source());

        let timeout = settings.api.timeout_secs.map(Duration::from_secs);
        let api = HttpYoutubeApi::new(&settings.api.base_url, credentials, timeout)?;
        Ok(Self::new(Arc::new(api)))
    }

    /// Get the underlying API implementation.
    pub fn api(&self) -> Arc<dyn YoutubeApi> {
        self.api.clone()
    }

    /// Search for tracks, videos or playlists.
    ///
    /// Song searches are biased towards music by appending "music" to the
    /// query and restricting to the Music category. At most 50 results are
    /// requested whatever `limit` says.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32, filter: SearchFilter) -> Result<Vec<Track>> {
        let kind = match filter {
            SearchFilter::Playlists => SearchKind::Playlist,
            SearchFilter::Songs
            | SearchFilter::Videos
            | SearchFilter::Albums
            | SearchFilter::Artists => SearchKind::Video,
        };

        let mut search_query = query.to_string();
        if filter == SearchFilter::Songs && !query.to_lowercase().contains("music") {
            search_query = format!("{} music", query);
        }

        let request = SearchRequest {
            query: search_query,
            kind,
            max_results: limit.clamp(1, MAX_RESULTS_PER_PAGE),
            video_category_id: (filter == SearchFilter::Songs)
                .then(|| MUSIC_CATEGORY_ID.to_string()),
        };

        let response = self.api.search(&request).await.map_err(|e| {
            warn!("Search failed: {}", e);
            YtMusicError::Search(e.to_string())
        })?;

        let tracks: Vec<Track> = response
            .items
            .into_iter()
            .map(|item| track_from_search(item, kind))
            .collect();
        debug!("Search returned {} results", tracks.len());
        Ok(tracks)
    }

    /// Create a playlist, then add `video_ids` one by one in order.
    ///
    /// If an add fails the playlist and the ids added before it remain.
    #[instrument(skip(self, description, video_ids), fields(videos = video_ids.len()))]
    pub async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: PrivacyStatus,
        video_ids: &[String],
    ) -> Result<CreatedPlaylist> {
        let resource = PlaylistResource {
            snippet: Some(PlaylistSnippet {
                title: title.to_string(),
                description: Some(description.to_string()),
                ..Default::default()
            }),
            status: Some(PlaylistStatus {
                privacy_status: Some(privacy),
            }),
            ..Default::default()
        };

        let created = self
            .api
            .insert_playlist(&resource)
            .await
            .map_err(|e| YtMusicError::PlaylistCreate(e.to_string()))?;
        let playlist_id = created.id.ok_or_else(|| {
            YtMusicError::PlaylistCreate("response carried no playlist id".to_string())
        })?;
        info!("Created playlist {}", playlist_id);

        for video_id in video_ids {
            self.api
                .insert_playlist_item(&playlist_id, video_id)
                .await
                .map_err(|e| {
                    YtMusicError::PlaylistCreate(format!(
                        "playlist {} was created but adding {} failed: {}",
                        playlist_id, video_id, e
                    ))
                })?;
        }

        Ok(CreatedPlaylist {
            url: playlist_url(&playlist_id),
            playlist_id,
            title: title.to_string(),
        })
    }

    /// Add videos to a playlist one at a time.
    ///
    /// A failed item is logged and skipped; the outcome reports how many of
    /// the requested ids made it.
    #[instrument(skip(self, video_ids), fields(videos = video_ids.len()))]
    pub async fn add_items(&self, playlist_id: &str, video_ids: &[String]) -> Result<AddItemsOutcome> {
        if playlist_id.trim().is_empty() {
            return Err(YtMusicError::AddItems("playlist id is empty".to_string()));
        }

        let mut results: Vec<(&String, Result<()>)> = Vec::with_capacity(video_ids.len());
        for video_id in video_ids {
            let result = self
                .api
                .insert_playlist_item(playlist_id, video_id)
                .await
                .map(|_| ());
            if let Err(e) = &result {
                warn!("Failed to add video {}: {}", video_id, e);
            }
            results.push((video_id, result));
        }

        let failed_video_ids: Vec<String> = results
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(id, _)| (*id).clone())
            .collect();

        Ok(AddItemsOutcome {
            playlist_id: playlist_id.to_string(),
            added_count: video_ids.len() - failed_video_ids.len(),
            requested_count: video_ids.len(),
            failed_video_ids,
        })
    }

    /// Fetch playlist metadata and its tracks, optionally capped at `limit`.
    #[instrument(skip(self))]
    pub async fn get_playlist(&self, playlist_id: &str, limit: Option<usize>) -> Result<Playlist> {
        let resource = self
            .fetch_playlist(playlist_id)
            .await
            .map_err(|e| match e {
                YtMusicError::NotFound(_) => e,
                other => YtMusicError::Retrieval(other.to_string()),
            })?;

        let snippet = resource.snippet.unwrap_or_default();
        let track_count = resource.content_details.map_or(0, |d| d.item_count);
        let collected = collect_tracks(self.api.as_ref(), playlist_id, limit).await?;

        Ok(Playlist {
            id: playlist_id.to_string(),
            title: snippet.title,
            description: snippet.description.filter(|d| !d.is_empty()),
            privacy: resource.status.and_then(|s| s.privacy_status),
            track_count,
            tracks: collected.tracks,
            truncated: collected.truncated,
        })
    }

    /// Read-modify-write of a playlist's title and description.
    ///
    /// A blank title leaves the current one in place; any provided
    /// description, including an empty one, replaces the current one.
    #[instrument(skip(self))]
    pub async fn update_playlist(
        &self,
        playlist_id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<UpdatedPlaylist> {
        let current = self.fetch_playlist(playlist_id).await.map_err(|e| match e {
            YtMusicError::NotFound(_) => e,
            other => YtMusicError::Update(other.to_string()),
        })?;

        let mut snippet = current.snippet.unwrap_or_default();
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            snippet.title = title.to_string();
        }
        if let Some(description) = description {
            snippet.description = Some(description.to_string());
        }

        let body = PlaylistResource {
            id: Some(playlist_id.to_string()),
            snippet: Some(PlaylistSnippet {
                title: snippet.title.clone(),
                description: Some(snippet.description.clone().unwrap_or_default()),
                ..Default::default()
            }),
            status: current.status,
            content_details: None,
        };

        let updated = self
            .api
            .update_playlist(&body)
            .await
            .map_err(|e| YtMusicError::Update(e.to_string()))?;
        let written = updated.snippet.unwrap_or(snippet);

        Ok(UpdatedPlaylist {
            playlist_id: playlist_id.to_string(),
            title: written.title,
            description: written.description.unwrap_or_default(),
        })
    }

    /// Delete a playlist. Deleting an already-deleted playlist is an error.
    #[instrument(skip(self))]
    pub async fn delete_playlist(&self, playlist_id: &str) -> Result<DeletedPlaylist> {
        self.api
            .delete_playlist(playlist_id)
            .await
            .map_err(|e| YtMusicError::Delete(format!("{}: {}", playlist_id, e)))?;
        info!("Deleted playlist {}", playlist_id);

        Ok(DeletedPlaylist {
            playlist_id: playlist_id.to_string(),
            deleted: true,
        })
    }

    /// List playlists owned by the authenticated user, in API order.
    #[instrument(skip(self))]
    pub async fn list_owned_playlists(&self, limit: u32) -> Result<Vec<PlaylistSummary>> {
        let query = PlaylistQuery::Mine {
            max_results: limit.clamp(1, MAX_RESULTS_PER_PAGE),
        };
        let response = self
            .api
            .list_playlists(&query)
            .await
            .map_err(|e| YtMusicError::Retrieval(e.to_string()))?;

        Ok(response
            .items
            .into_iter()
            .map(|item| {
                let snippet = item.snippet.unwrap_or_default();
                PlaylistSummary {
                    playlist_id: item.id.unwrap_or_default(),
                    title: snippet.title,
                    description: snippet.description.unwrap_or_default(),
                    count: item.content_details.map_or(0, |d| d.item_count),
                }
            })
            .collect())
    }

    /// Fetch a single playlist resource, mapping "no such playlist" to
    /// `NotFound`. Other failures are returned as-is.
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistResource> {
        let response = self
            .api
            .list_playlists(&PlaylistQuery::ById(playlist_id.to_string()))
            .await
            .map_err(|e| match e.status() {
                Some(404) => YtMusicError::NotFound(playlist_id.to_string()),
                _ => e,
            })?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YtMusicError::NotFound(playlist_id.to_string()))
    }
}

fn track_from_search(item: SearchResult, kind: SearchKind) -> Track {
    let snippet = item.snippet;
    let video_id = match kind {
        SearchKind::Video => item.id.video_id,
        SearchKind::Playlist => item.id.playlist_id,
    };

    Track {
        video_id,
        title: snippet.title.unwrap_or_default(),
        artists: vec![Artist {
            name: snippet.channel_title.unwrap_or_default(),
            id: snippet.channel_id,
        }],
        album: None,
        duration: None,
        thumbnails: snippet.thumbnails,
        published_at: snippet.published_at,
        description: Some(
            snippet
                .description
                .unwrap_or_default()
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect(),
        ),
        position: None,
    }
}
