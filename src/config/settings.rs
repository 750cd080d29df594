//! Configuration settings for ytmusic-mcp.

use crate::music::MAX_SEARCH_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub auth: AuthSettings,
    pub api: ApiSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Where the OAuth token bundle comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Path to the authorized-user token file.
    pub token_file: String,
    /// Environment variable holding the token bundle as raw JSON.
    pub token_json_env: String,
    /// Environment variable holding the token bundle as base64 JSON.
    /// Takes precedence over `token_json_env`.
    pub token_b64_env: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_file: "~/.config/ytmusic-mcp/token.json".to_string(),
            token_json_env: "YOUTUBE_TOKEN_JSON".to_string(),
            token_b64_env: "YOUTUBE_TOKEN_B64".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the YouTube Data API.
    pub base_url: String,
    /// Optional request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
    /// Default number of search results when a tool call omits `limit`.
    pub search_limit: u32,
    /// Default number of library playlists when a tool call omits `limit`.
    pub library_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout_secs: None,
            search_limit: 20,
            library_limit: 25,
        }
    }
}

/// HTTP transport settings for `ytmusic-mcp serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values the tool layer would refuse from a caller.
    pub fn validate(&self) -> crate::error::Result<()> {
        for (key, value) in [
            ("api.search_limit", self.api.search_limit),
            ("api.library_limit", self.api.library_limit),
        ] {
            if !(1..=MAX_SEARCH_LIMIT).contains(&value) {
                return Err(crate::error::YtMusicError::Config(format!(
                    "{} must be between 1 and {}, got {}",
                    key, MAX_SEARCH_LIMIT, value
                )));
            }
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtMusicError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytmusic-mcp")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded token file path.
    pub fn token_file(&self) -> PathBuf {
        Self::expand_path(&self.auth.token_file)
    }
}
