//! Resolve free-text queries to tracks and add them to a playlist.

use super::{AddedTrack, BatchResult, MusicClient, SearchFilter, Track};
use crate::error::Result;
use tracing::{info, instrument, warn};

impl MusicClient {
    /// Search for each query in turn and add every top result to the
    /// playlist with a single bulk add.
    ///
    /// Per-query failures are collected into `failed_queries`; this never
    /// returns an error. `confirmed_count` is what the bulk add reported,
    /// which can be lower than `added_count`.
    #[instrument(skip(self, queries), fields(queries = queries.len()))]
    pub async fn search_and_add(&self, playlist_id: &str, queries: &[String]) -> BatchResult {
        let mut result = BatchResult::default();
        let mut pending: Vec<String> = Vec::new();

        for query in queries {
            match self.top_result(query).await {
                Ok(Some((video_id, track))) => {
                    result.added_tracks.push(AddedTrack {
                        query: query.clone(),
                        matched: track.title.clone(),
                        artists: track.artist_names(),
                        video_id: video_id.clone(),
                    });
                    pending.push(video_id);
                }
                Ok(None) => {
                    warn!("No usable result for {:?}", query);
                    result.failed_queries.push(query.clone());
                }
                Err(e) => {
                    warn!("Search for {:?} failed: {}", query, e);
                    result.failed_queries.push(query.clone());
                }
            }
        }

        result.added_count = pending.len();
        if pending.is_empty() {
            return result;
        }

        result.confirmed_count = match self.add_items(playlist_id, &pending).await {
            Ok(outcome) => outcome.added_count,
            Err(e) => {
                warn!("Bulk add to {} failed: {}", playlist_id, e);
                0
            }
        };
        info!(
            "Resolved {} of {} queries, {} accepted by {}",
            result.added_count,
            queries.len(),
            result.confirmed_count,
            playlist_id
        );
        result
    }

    /// First song result for `query`, if it carries a video id.
    async fn top_result(&self, query: &str) -> Result<Option<(String, Track)>> {
        let tracks = self.search(query, 1, SearchFilter::Songs).await?;
        Ok(tracks
            .into_iter()
            .next()
            .and_then(|track| track.video_id.clone().map(|id| (id, track))))
    }
}
