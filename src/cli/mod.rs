//! CLI module for ytmusic-mcp.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytmusic-mcp - YouTube Music playlists for AI assistants
///
/// Exposes playlist search and management as MCP tools over stdio or HTTP,
/// backed by the YouTube Data API.
#[derive(Parser, Debug)]
#[command(name = "ytmusic-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "YTMUSIC_MCP_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server on stdio for AI assistant integration (Claude, etc.)
    Mcp,

    /// Start MCP server over HTTP
    Serve {
        /// Host to bind to (defaults to server.host from the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from the config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check credentials and API connectivity
    Doctor,

    /// Search YouTube for tracks
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (1-100)
        #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,

        /// Filter (songs, videos, albums, artists, playlists)
        #[arg(short, long, default_value = "songs")]
        filter: String,
    },

    /// List your playlists
    Playlists {
        /// Maximum number of playlists
        #[arg(short, long, default_value = "25")]
        limit: u32,
    },

    /// Show a playlist and its tracks
    Playlist {
        /// Playlist ID or URL
        id: String,

        /// Maximum number of tracks to fetch (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playlist_command() {
        let cli = Cli::parse_from(["ytmusic-mcp", "-vv", "playlist", "PL1", "--limit", "5"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Playlist { ref id, limit: Some(5) } if id == "PL1"
        ));
    }

    #[test]
    fn test_search_limit_is_range_checked() {
        assert!(Cli::try_parse_from(["ytmusic-mcp", "search", "x", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["ytmusic-mcp", "search", "x", "--limit", "100"]).is_ok());
    }

    #[test]
    fn test_serve_defaults_to_config() {
        let cli = Cli::parse_from(["ytmusic-mcp", "serve"]);
        assert!(matches!(cli.command, Commands::Serve { host: None, port: None }));
    }
}
