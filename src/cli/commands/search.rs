//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::music::{MusicClient, SearchFilter};
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, limit: u32, filter: &str, settings: Settings) -> Result<()> {
    let filter: SearchFilter = filter.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let client = MusicClient::connect(&settings).await?;

    let spinner = Output::spinner("Searching...");
    let results = client.search(query, limit, filter).await;
    spinner.finish_and_clear();

    match results {
        Ok(tracks) if tracks.is_empty() => {
            Output::warning("No results found matching your query.");
        }
        Ok(tracks) => {
            Output::success(&format!("Found {} results", tracks.len()));
            for track in &tracks {
                Output::track(track);
            }
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
