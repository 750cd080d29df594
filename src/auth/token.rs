//! OAuth token bundle in Google's authorized-user JSON format.

use crate::error::{Result, YtMusicError};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// Tokens expiring within this window are treated as expired.
const EXPIRY_SKEW_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_scopes() -> Vec<String> {
    vec![YOUTUBE_SCOPE.to_string()]
}

/// Accepts RFC 3339 as well as the zone-less timestamps some writers emit.
fn deserialize_expiry<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// An already-issued OAuth credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBundle {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_expiry")]
    pub expiry: Option<DateTime<Utc>>,
}

impl TokenBundle {
    /// Parse a bundle from raw JSON. Stray newlines from copy-pasted
    /// environment values are removed first.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cleaned.is_empty() {
            return Err(YtMusicError::Credential("Token JSON is empty".to_string()));
        }
        serde_json::from_str(&cleaned)
            .map_err(|e| YtMusicError::Credential(format!("Invalid token JSON: {}", e)))
    }

    /// A bundle holding only a non-expiring access token.
    pub fn from_access_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            refresh_token: None,
            token_uri: default_token_uri(),
            client_id: None,
            client_secret: None,
            scopes: default_scopes(),
            expiry: None,
        }
    }

    /// Parse a bundle from base64-encoded JSON.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| YtMusicError::Credential(format!("Invalid base64 token: {}", e)))?;
        let json = String::from_utf8(bytes)
            .map_err(|e| YtMusicError::Credential(format!("Token is not UTF-8: {}", e)))?;
        Self::parse(&json)
    }

    /// Whether the access token is missing or about to expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (None, _) => true,
            (Some(token), _) if token.is_empty() => true,
            (Some(_), Some(expiry)) => expiry <= now + Duration::seconds(EXPIRY_SKEW_SECS),
            (Some(_), None) => false,
        }
    }

    /// Whether the bundle carries everything a refresh-token grant needs.
    pub fn can_refresh(&self) -> bool {
        [&self.refresh_token, &self.client_id, &self.client_secret]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}
