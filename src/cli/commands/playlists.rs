//! Playlists command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::music::MusicClient;
use anyhow::Result;

/// List the authenticated user's playlists.
pub async fn run_playlists(limit: u32, settings: Settings) -> Result<()> {
    let client = MusicClient::connect(&settings).await?;

    match client.list_owned_playlists(limit).await {
        Ok(playlists) if playlists.is_empty() => {
            Output::info("No playlists found in your library.");
        }
        Ok(playlists) => {
            Output::header(&format!("Playlists ({})", playlists.len()));
            println!();
            for playlist in &playlists {
                Output::playlist(playlist);
            }

            let total: u32 = playlists.iter().map(|p| p.count).sum();
            println!();
            Output::kv("Total tracks", &total.to_string());
        }
        Err(e) => {
            Output::error(&format!("Failed to list playlists: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
