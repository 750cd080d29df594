//! CLI command implementations.

mod config;
mod doctor;
mod mcp;
mod playlist;
mod playlists;
mod search;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use playlist::run_playlist;
pub use playlists::run_playlists;
pub use search::run_search;
pub use serve::{router, run_serve};
