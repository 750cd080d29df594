//! ytmusic-mcp - YouTube Music playlists as MCP tools
//!
//! Exposes music search and playlist management on a YouTube account to AI
//! assistants through the Model Context Protocol, backed by the YouTube Data
//! API v3.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `auth` - OAuth token bundle loading and refresh
//! - `youtube` - YouTube Data API abstraction (HTTP and in-memory)
//! - `music` - Typed music/playlist operations, pagination and batch workflows
//! - `mcp` - JSON-RPC tool server
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use ytmusic_mcp::config::Settings;
//! use ytmusic_mcp::music::{MusicClient, SearchFilter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = MusicClient::connect(&settings).await?;
//!
//!     let tracks = client.search("Neu! Hallogallo", 5, SearchFilter::Songs).await?;
//!     for track in &tracks {
//!         println!("{} - {}", track.title, track.artist_names().join(", "));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod music;
pub mod youtube;

pub use error::{Result, YtMusicError};
