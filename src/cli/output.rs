//! CLI output formatting utilities.

use crate::music::{PlaylistSummary, Track};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a track line.
    pub fn track(track: &Track) {
        let prefix = match track.position {
            Some(position) => format!("{:>3}.", position + 1),
            None => style("*").cyan().to_string(),
        };
        println!(
            "  {} {} - {} {}",
            prefix,
            style(&track.title).bold(),
            track.artist_names().join(", "),
            style(track.video_id.as_deref().unwrap_or("-")).dim()
        );
    }

    /// Print a playlist summary line.
    pub fn playlist(playlist: &PlaylistSummary) {
        println!(
            "  {} {} ({} tracks) {}",
            style("*").cyan(),
            style(&playlist.title).bold(),
            playlist.count,
            style(&playlist.playlist_id).dim()
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
