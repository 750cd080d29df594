//! HTTP implementation of the YouTube Data API.

use super::models::{
    ApiErrorEnvelope, PlaylistItemListResponse, PlaylistItemResource, PlaylistItemSnippet,
    PlaylistListResponse, PlaylistResource, ResourceId, SearchListResponse,
};
use super::{PlaylistQuery, SearchRequest, YoutubeApi};
use crate::auth::{CredentialSource, Credentials, TokenBundle};
use crate::error::{Result, YtMusicError};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use url::Url;

const PLAYLIST_READ_PARTS: &str = "snippet,contentDetails,status";
const PLAYLIST_WRITE_PARTS: &str = "snippet,status";

/// YouTube Data API client authenticated with OAuth credentials.
///
/// The access token is refreshed before a call when it has expired.
pub struct HttpYoutubeApi {
    http: reqwest::Client,
    base_url: Url,
    credentials: Mutex<Credentials>,
}

impl HttpYoutubeApi {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, credentials: Credentials, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| YtMusicError::Config(format!("Invalid API base URL {}: {}", base_url, e)))?;
        // Url::join replaces the last path segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            credentials: Mutex::new(credentials),
        })
    }

    /// Create a client with a fixed, non-expiring access token.
    pub fn with_token(base_url: &str, access_token: &str) -> Result<Self> {
        let credentials = Credentials::new(
            TokenBundle::from_access_token(access_token),
            CredentialSource::EnvJson("static".to_string()),
        );
        Self::new(base_url, credentials, None)
    }

    fn endpoint(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(resource)
            .map_err(|e| YtMusicError::Config(format!("Invalid endpoint {}: {}", resource, e)))
    }

    async fn request(&self, method: Method, resource: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(resource)?;
        let token = {
            let mut credentials = self.credentials.lock().await;
            credentials.ensure_fresh(&self.http).await?;
            credentials.access_token()?.to_string()
        };
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Turn a non-2xx response into `YtMusicError::Api`.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };

        debug!("API returned {}: {}", status, message);
        Err(YtMusicError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl YoutubeApi for HttpYoutubeApi {
    #[instrument(skip(self), fields(q = %request.query))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchListResponse> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", request.query.clone()),
            ("type", request.kind.as_str().to_string()),
            ("maxResults", request.max_results.to_string()),
        ];
        if let Some(category) = &request.video_category_id {
            params.push(("videoCategoryId", category.clone()));
        }

        let builder = self.request(Method::GET, "search").await?;
        Self::fetch(builder.query(&params)).await
    }

    #[instrument(skip(self, playlist))]
    async fn insert_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource> {
        let request = self.request(Method::POST, "playlists").await?;
        Self::fetch(request.query(&[("part", PLAYLIST_WRITE_PARTS)]).json(playlist)).await
    }

    #[instrument(skip(self))]
    async fn list_playlists(&self, query: &PlaylistQuery) -> Result<PlaylistListResponse> {
        let mut params = vec![("part", PLAYLIST_READ_PARTS.to_string())];
        match query {
            PlaylistQuery::ById(id) => params.push(("id", id.clone())),
            PlaylistQuery::Mine { max_results } => {
                params.push(("mine", "true".to_string()));
                params.push(("maxResults", max_results.to_string()));
            }
        }

        let request = self.request(Method::GET, "playlists").await?;
        Self::fetch(request.query(&params)).await
    }

    #[instrument(skip(self, playlist), fields(id = ?playlist.id))]
    async fn update_playlist(&self, playlist: &PlaylistResource) -> Result<PlaylistResource> {
        let request = self.request(Method::PUT, "playlists").await?;
        Self::fetch(request.query(&[("part", PLAYLIST_WRITE_PARTS)]).json(playlist)).await
    }

    #[instrument(skip(self))]
    async fn delete_playlist(&self, playlist_id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, "playlists").await?;
        Self::check(request.query(&[("id", playlist_id)]).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<PlaylistItemResource> {
        let body = PlaylistItemResource {
            id: None,
            snippet: PlaylistItemSnippet {
                playlist_id: Some(playlist_id.to_string()),
                resource_id: Some(ResourceId::video(video_id)),
                ..Default::default()
            },
        };

        let request = self.request(Method::POST, "playlistItems").await?;
        Self::fetch(request.query(&[("part", "snippet")]).json(&body)).await
    }

    #[instrument(skip(self))]
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("playlistId", playlist_id.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let request = self.request(Method::GET, "playlistItems").await?;
        Self::fetch(request.query(&params)).await
    }
}
