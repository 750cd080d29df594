//! Integration tests for the HTTP YouTube Data API client.

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytmusic_mcp::music::{MusicClient, PrivacyStatus, SearchFilter};
use ytmusic_mcp::youtube::HttpYoutubeApi;
use ytmusic_mcp::YtMusicError;

const TOKEN: &str = "ya29.test-token";

fn client(server: &MockServer) -> MusicClient {
    let api = HttpYoutubeApi::with_token(&format!("{}/youtube/v3", server.uri()), TOKEN).unwrap();
    MusicClient::new(Arc::new(api))
}

fn item(position: u32, video_id: &str) -> serde_json::Value {
    json!({
        "id": format!("item-{}", position),
        "snippet": {
            "playlistId": "PL1",
            "title": format!("Track {}", position),
            "position": position,
            "resourceId": { "kind": "youtube#video", "videoId": video_id },
            "videoOwnerChannelTitle": "NEU! - Topic",
            "videoOwnerChannelId": "UCneu"
        }
    })
}

#[tokio::test]
async fn test_search_sends_bearer_and_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(query_param("part", "snippet"))
        .and(query_param("q", "Neu! Hallogallo music"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "50"))
        .and(query_param("videoCategoryId", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": {
                    "publishedAt": "1972-01-01T00:00:00Z",
                    "channelId": "UCneu",
                    "title": "Hallogallo",
                    "description": "x".repeat(300),
                    "channelTitle": "NEU! - Topic",
                    "thumbnails": { "default": { "url": "https://i.ytimg.com/vi/abc123/default.jpg" } }
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = client(&server)
        .search("Neu! Hallogallo", 75, SearchFilter::Songs)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].video_id.as_deref(), Some("abc123"));
    assert_eq!(tracks[0].artists[0].name, "NEU! - Topic");
    assert_eq!(tracks[0].artists[0].id.as_deref(), Some("UCneu"));
    assert_eq!(tracks[0].description.as_ref().unwrap().chars().count(), 200);
    assert!(tracks[0].thumbnails.as_ref().unwrap().contains_key("default"));
}

#[tokio::test]
async fn test_video_search_has_no_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "live set"))
        .and(query_param_is_missing("videoCategoryId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = client(&server)
        .search("live set", 5, SearchFilter::Videos)
        .await
        .unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_api_error_body_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota."
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .search("anything", 5, SearchFilter::Songs)
        .await
        .unwrap_err();

    match err {
        YtMusicError::Search(message) => {
            assert!(message.contains("403"));
            assert!(message.contains("exceeded your quota"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_playlist_follows_page_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("part", "snippet,contentDetails,status"))
        .and(query_param("id", "PL1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "PL1",
                "snippet": { "title": "Kraut", "description": "Motorik" },
                "status": { "privacyStatus": "public" },
                "contentDetails": { "itemCount": 3 }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("playlistId", "PL1"))
        .and(query_param("maxResults", "50"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [item(0, "v0"), item(1, "v1")],
            "nextPageToken": "CAIQAA"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("pageToken", "CAIQAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [item(2, "v2")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let playlist = client(&server).get_playlist("PL1", None).await.unwrap();

    assert_eq!(playlist.title, "Kraut");
    assert_eq!(playlist.description.as_deref(), Some("Motorik"));
    assert_eq!(playlist.privacy, Some(PrivacyStatus::Public));
    assert_eq!(playlist.track_count, 3);
    let ids: Vec<_> = playlist
        .tracks
        .iter()
        .map(|t| t.video_id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["v0", "v1", "v2"]);
    assert_eq!(playlist.tracks[2].artist_names(), vec!["NEU! - Topic"]);
    assert!(!playlist.truncated);
}

#[tokio::test]
async fn test_failed_page_aborts_retrieval() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "PL1", "snippet": { "title": "Kraut" } }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let err = client(&server).get_playlist("PL1", None).await.unwrap_err();
    assert!(matches!(err, YtMusicError::Retrieval(_)));
}

#[tokio::test]
async fn test_missing_playlist_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let err = client(&server).get_playlist("PLX", None).await.unwrap_err();
    assert!(matches!(err, YtMusicError::NotFound(id) if id == "PLX"));
}

#[tokio::test]
async fn test_create_playlist_then_add_items() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("part", "snippet,status"))
        .and(body_json(json!({
            "snippet": { "title": "Kraut", "description": "Motorik" },
            "status": { "privacyStatus": "unlisted" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "PLnew",
            "snippet": { "title": "Kraut" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("part", "snippet"))
        .and(body_json(json!({
            "snippet": {
                "playlistId": "PLnew",
                "resourceId": { "kind": "youtube#video", "videoId": "abc123" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "item-0",
            "snippet": { "playlistId": "PLnew", "position": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_playlist(
            "Kraut",
            "Motorik",
            PrivacyStatus::Unlisted,
            &["abc123".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(created.playlist_id, "PLnew");
    assert_eq!(created.url, "https://www.youtube.com/playlist?list=PLnew");
}

#[tokio::test]
async fn test_delete_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("id", "PL1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("id", "PLX"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Playlist not found." }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.delete_playlist("PL1").await.unwrap().deleted);

    let err = client.delete_playlist("PLX").await.unwrap_err();
    assert!(matches!(err, YtMusicError::Delete(_)));
}

#[tokio::test]
async fn test_update_playlist_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("id", "PL1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "PL1",
                "snippet": { "title": "Old", "description": "Keep" },
                "status": { "privacyStatus": "private" }
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/youtube/v3/playlists"))
        .and(query_param("part", "snippet,status"))
        .and(body_json(json!({
            "id": "PL1",
            "snippet": { "title": "New", "description": "Keep" },
            "status": { "privacyStatus": "private" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "PL1",
            "snippet": { "title": "New", "description": "Keep" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server)
        .update_playlist("PL1", Some("New"), None)
        .await
        .unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.description, "Keep");
}
