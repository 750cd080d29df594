//! Playlist command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::music::{normalize_playlist_id, playlist_url, MusicClient};
use anyhow::Result;

/// Show one playlist with its tracks.
pub async fn run_playlist(id: &str, limit: Option<usize>, settings: Settings) -> Result<()> {
    let playlist_id = normalize_playlist_id(id);
    let client = MusicClient::connect(&settings).await?;

    let spinner = Output::spinner("Fetching playlist...");
    let result = client.get_playlist(&playlist_id, limit).await;
    spinner.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    Output::header(&playlist.title);
    if let Some(description) = &playlist.description {
        println!("{}", description);
    }
    println!();
    Output::kv("ID", &playlist.id);
    Output::kv("URL", &playlist_url(&playlist.id));
    if let Some(privacy) = playlist.privacy {
        Output::kv("Privacy", &privacy.to_string());
    }
    Output::kv("Tracks", &playlist.track_count.to_string());
    println!();

    for track in &playlist.tracks {
        Output::track(track);
    }

    if playlist.truncated {
        println!();
        Output::info(&format!(
            "Showing the first {} of {} tracks.",
            playlist.tracks.len(),
            playlist.track_count
        ));
    }

    Ok(())
}
