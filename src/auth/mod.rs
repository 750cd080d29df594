//! OAuth credential loading for the YouTube Data API.
//!
//! The interactive consent flow is handled elsewhere; this module only
//! consumes an already-issued token bundle and refreshes its access token
//! when needed.

mod token;

pub use token::{TokenBundle, DEFAULT_TOKEN_URI, YOUTUBE_SCOPE};

use crate::config::AuthSettings;
use crate::error::{Result, YtMusicError};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Where a token bundle was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    EnvBase64(String),
    EnvJson(String),
    File(PathBuf),
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::EnvBase64(var) => write!(f, "${} (base64)", var),
            CredentialSource::EnvJson(var) => write!(f, "${}", var),
            CredentialSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// A token bundle together with its origin.
#[derive(Debug, Clone)]
pub struct Credentials {
    bundle: TokenBundle,
    source: CredentialSource,
}

impl Credentials {
    pub fn new(bundle: TokenBundle, source: CredentialSource) -> Self {
        Self { bundle, source }
    }

    /// Load credentials from the process environment or the token file.
    pub fn load(settings: &AuthSettings, token_file: &Path) -> Result<Self> {
        Self::load_with(settings, token_file, |var| std::env::var(var).ok())
    }

    /// Load credentials using `lookup` to read environment variables.
    ///
    /// Precedence: base64 variable, raw JSON variable, token file.
    pub fn load_with(
        settings: &AuthSettings,
        token_file: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(encoded) = non_empty(&settings.token_b64_env) {
            debug!("Loading credentials from ${}", settings.token_b64_env);
            return Ok(Self::new(
                TokenBundle::from_base64(&encoded)?,
                CredentialSource::EnvBase64(settings.token_b64_env.clone()),
            ));
        }

        if let Some(raw) = non_empty(&settings.token_json_env) {
            debug!("Loading credentials from ${}", settings.token_json_env);
            return Ok(Self::new(
                TokenBundle::parse(&raw)?,
                CredentialSource::EnvJson(settings.token_json_env.clone()),
            ));
        }

        if token_file.exists() {
            debug!("Loading credentials from {}", token_file.display());
            let raw = std::fs::read_to_string(token_file).map_err(|e| {
                YtMusicError::Credential(format!(
                    "Cannot read token file {}: {}",
                    token_file.display(),
                    e
                ))
            })?;
            return Ok(Self::new(
                TokenBundle::parse(&raw)?,
                CredentialSource::File(token_file.to_path_buf()),
            ));
        }

        Err(YtMusicError::Credential(format!(
            "No credentials found. Set {} or {}, or place a token file at {}",
            settings.token_b64_env,
            settings.token_json_env,
            token_file.display()
        )))
    }

    pub fn bundle(&self) -> &TokenBundle {
        &self.bundle
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// The current access token.
    pub fn access_token(&self) -> Result<&str> {
        self.bundle
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| YtMusicError::Credential("No access token available".to_string()))
    }

    /// Refresh the access token if it is missing or expired.
    ///
    /// Returns `true` when a refresh happened. Bundles loaded from a file
    /// are written back after a refresh; a failed write is only logged.
    #[instrument(skip(self, http), fields(source = %self.source))]
    pub async fn ensure_fresh(&mut self, http: &reqwest::Client) -> Result<bool> {
        if !self.bundle.is_expired(Utc::now()) {
            return Ok(false);
        }

        if !self.bundle.can_refresh() {
            return Err(YtMusicError::Credential(
                "Access token is expired or missing and the bundle cannot be refreshed \
                 (refresh_token, client_id and client_secret are required)"
                    .to_string(),
            ));
        }

        self.refresh(http).await?;

        if let CredentialSource::File(path) = &self.source {
            let saved = match serde_json::to_string_pretty(&self.bundle) {
                Ok(content) => tokio::fs::write(path, content).await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match saved {
                Ok(()) => debug!("Saved refreshed credentials to {}", path.display()),
                Err(e) => warn!("Could not save refreshed credentials to {}: {}", path.display(), e),
            }
        }

        Ok(true)
    }

    async fn refresh(&mut self, http: &reqwest::Client) -> Result<()> {
        info!("Refreshing expired access token");

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.bundle.refresh_token.as_deref().unwrap_or_default()),
            ("client_id", self.bundle.client_id.as_deref().unwrap_or_default()),
            ("client_secret", self.bundle.client_secret.as_deref().unwrap_or_default()),
        ];

        let response = http
            .post(&self.bundle.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| YtMusicError::Credential(format!("Token refresh request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YtMusicError::Credential(format!(
                "Token refresh failed ({}): {}",
                status,
                body.trim()
            )));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| YtMusicError::Credential(format!("Invalid token response: {}", e)))?;

        self.bundle.token = Some(refreshed.access_token);
        self.bundle.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Ok(())
    }
}
