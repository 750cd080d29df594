//! Configuration module for ytmusic-mcp.
//!
//! Handles loading and saving application settings.

mod settings;

pub use settings::{ApiSettings, AuthSettings, GeneralSettings, ServerSettings, Settings};
