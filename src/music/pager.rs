//! Continuation-token walk over a playlist's items.

use super::{Artist, Track};
use crate::error::{Result, YtMusicError};
use crate::youtube::models::PlaylistItemResource;
use crate::youtube::{YoutubeApi, MAX_RESULTS_PER_PAGE};
use tracing::debug;

/// Tracks gathered from a playlist.
#[derive(Debug, Default)]
pub(crate) struct CollectedTracks {
    pub tracks: Vec<Track>,
    /// The cap was hit while more items remained.
    pub truncated: bool,
}

/// Walk the playlist's pages in order until the API stops handing out page
/// tokens, or until `cap` tracks have been collected.
///
/// No further page is requested once the cap is reached. Any page failure
/// aborts the walk; partial results are discarded.
pub(crate) async fn collect_tracks(
    api: &dyn YoutubeApi,
    playlist_id: &str,
    cap: Option<usize>,
) -> Result<CollectedTracks> {
    let mut collected = CollectedTracks::default();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if cap.is_some_and(|cap| collected.tracks.len() >= cap) {
            break;
        }

        let page = api
            .list_playlist_items(playlist_id, page_token.as_deref(), MAX_RESULTS_PER_PAGE)
            .await
            .map_err(|e| YtMusicError::Retrieval(format!("{}: {}", playlist_id, e)))?;
        pages += 1;

        let mut items = page.items.into_iter();
        for item in items.by_ref() {
            collected.tracks.push(track_from_item(item));
            if cap.is_some_and(|cap| collected.tracks.len() >= cap) {
                break;
            }
        }

        let has_more_items = items.next().is_some();
        page_token = page.next_page_token;

        if cap.is_some_and(|cap| collected.tracks.len() >= cap) {
            collected.truncated = has_more_items || page_token.is_some();
            break;
        }
        if page_token.is_none() {
            break;
        }
    }

    debug!(
        "Collected {} tracks from {} in {} pages",
        collected.tracks.len(),
        playlist_id,
        pages
    );
    Ok(collected)
}

/// Playlist items only expose the uploading channel, so the artist list
/// degrades to that single entry.
fn track_from_item(item: PlaylistItemResource) -> Track {
    let snippet = item.snippet;
    Track {
        video_id: snippet.resource_id.and_then(|r| r.video_id),
        title: snippet.title.unwrap_or_default(),
        artists: vec![Artist {
            name: snippet.video_owner_channel_title.unwrap_or_default(),
            id: snippet.video_owner_channel_id,
        }],
        album: None,
        duration: None,
        thumbnails: snippet.thumbnails,
        published_at: snippet.published_at,
        description: None,
        position: snippet.position,
    }
}
