//! Wire models for the YouTube Data API v3 resources we touch.
//!
//! Only the fields this crate reads or writes are modelled; everything else in
//! the API responses is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single thumbnail rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Thumbnails keyed by size name (`default`, `medium`, `high`, ...).
pub type Thumbnails = BTreeMap<String, Thumbnail>;

/// Playlist visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    #[serde(alias = "PRIVATE", alias = "Private")]
    Private,
    #[serde(alias = "PUBLIC", alias = "Public")]
    Public,
    #[serde(alias = "UNLISTED", alias = "Unlisted")]
    Unlisted,
}

impl std::str::FromStr for PrivacyStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(PrivacyStatus::Private),
            "public" => Ok(PrivacyStatus::Public),
            "unlisted" => Ok(PrivacyStatus::Unlisted),
            _ => Err(format!("Unknown privacy status: {}", s)),
        }
    }
}

impl std::fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrivacyStatus::Private => write!(f, "private"),
            PrivacyStatus::Public => write!(f, "public"),
            PrivacyStatus::Unlisted => write!(f, "unlisted"),
        }
    }
}

/// Polymorphic resource reference (`id` of a search result, `resourceId` of a
/// playlist item).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl ResourceId {
    /// Reference to a video, as used when inserting playlist items.
    pub fn video(video_id: &str) -> Self {
        Self {
            kind: Some("youtube#video".to_string()),
            video_id: Some(video_id.to_string()),
            ..Default::default()
        }
    }
}

// === search.list ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
    #[serde(default)]
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// === playlists ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_status: Option<PrivacyStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    #[serde(default)]
    pub item_count: u32,
}

/// A `youtube#playlist` resource, used both for reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<PlaylistSnippet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlaylistStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// === playlistItems ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_owner_channel_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_owner_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

/// A `youtube#playlistItem` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItemResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// === errors ===

/// Google API error envelope: `{"error": {"code": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_privacy_status_accepts_any_case() {
        let upper: PrivacyStatus = serde_json::from_value(json!("UNLISTED")).unwrap();
        let lower: PrivacyStatus = serde_json::from_value(json!("public")).unwrap();
        assert_eq!(upper, PrivacyStatus::Unlisted);
        assert_eq!(lower, PrivacyStatus::Public);
        assert_eq!(serde_json::to_value(PrivacyStatus::Private).unwrap(), json!("private"));
        assert_eq!("Public".parse::<PrivacyStatus>().unwrap(), PrivacyStatus::Public);
    }

    #[test]
    fn test_search_result_tolerates_missing_fields() {
        let response: SearchListResponse = serde_json::from_value(json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc123"},
                 "snippet": {"title": "Hallogallo", "publishedAt": "1972-01-01T00:00:00Z"}},
                {"id": {"kind": "youtube#channel"}}
            ]
        }))
        .unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].id.video_id.as_deref(), Some("abc123"));
        assert!(response.items[0].snippet.published_at.is_some());
        assert!(response.items[1].snippet.title.is_none());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_playlist_write_omits_read_only_fields() {
        let resource = PlaylistResource {
            id: Some("PL1".to_string()),
            snippet: Some(PlaylistSnippet {
                title: "Krautrock".to_string(),
                description: Some(String::new()),
                ..Default::default()
            }),
            status: Some(PlaylistStatus {
                privacy_status: Some(PrivacyStatus::Private),
            }),
            content_details: None,
        };

        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({
                "id": "PL1",
                "snippet": {"title": "Krautrock", "description": ""},
                "status": {"privacyStatus": "private"}
            })
        );
    }
}
