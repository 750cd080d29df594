//! MCP tool definitions for the playlist tools.

use super::protocol::Tool;
use serde_json::json;

pub const SEARCH: &str = "search_youtube_music";
pub const CREATE_PLAYLIST: &str = "create_youtube_music_playlist";
pub const ADD_TRACKS: &str = "add_tracks_to_playlist";
pub const SEARCH_AND_ADD: &str = "search_and_add_to_playlist";
pub const PLAYLIST_DETAILS: &str = "get_playlist_details";
pub const LIBRARY_PLAYLISTS: &str = "get_library_playlists";
pub const UPDATE_PLAYLIST: &str = "update_playlist";
pub const DELETE_PLAYLIST: &str = "delete_playlist";

/// Names of every tool, in listing order.
pub const TOOL_NAMES: [&str; 8] = [
    SEARCH,
    CREATE_PLAYLIST,
    ADD_TRACKS,
    SEARCH_AND_ADD,
    PLAYLIST_DETAILS,
    LIBRARY_PLAYLISTS,
    UPDATE_PLAYLIST,
    DELETE_PLAYLIST,
];

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH.to_string(),
            description: "Search for music on YouTube Music. Returns track information including \
                videoId (needed for adding to playlists), title and artists. \
                Use this to find songs before adding them to playlists."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (e.g., 'Manuel Göttsching E2-E4', 'Neu! Hallogallo')"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (1-100)",
                        "default": 20,
                        "minimum": 1,
                        "maximum": 100
                    },
                    "filter": {
                        "type": "string",
                        "description": "Filter results by type",
                        "enum": ["songs", "videos", "albums", "artists", "playlists"],
                        "default": "songs"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: CREATE_PLAYLIST.to_string(),
            description: "Create a new playlist on YouTube Music. Can optionally add tracks \
                immediately. Returns the playlist ID and URL."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Playlist title"
                    },
                    "description": {
                        "type": "string",
                        "description": "Playlist description",
                        "default": ""
                    },
                    "privacy_status": {
                        "type": "string",
                        "description": "Playlist visibility",
                        "enum": ["PRIVATE", "PUBLIC", "UNLISTED"],
                        "default": "PRIVATE"
                    },
                    "video_ids": {
                        "type": "array",
                        "description": "Optional list of video IDs to add to the playlist on creation",
                        "items": { "type": "string" },
                        "default": []
                    }
                },
                "required": ["title"]
            }),
        },
        Tool {
            name: ADD_TRACKS.to_string(),
            description: "Add tracks to an existing YouTube Music playlist using video IDs. \
                Get video IDs using the search_youtube_music tool first."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlist_id": {
                        "type": "string",
                        "description": "Target playlist ID or URL"
                    },
                    "video_ids": {
                        "type": "array",
                        "description": "List of video IDs to add",
                        "items": { "type": "string" }
                    }
                },
                "required": ["playlist_id", "video_ids"]
            }),
        },
        Tool {
            name: SEARCH_AND_ADD.to_string(),
            description: "Search for tracks and add the top result of each to a playlist in one \
                operation. Useful for quickly building playlists from a list of song names."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlist_id": {
                        "type": "string",
                        "description": "Target playlist ID or URL"
                    },
                    "search_queries": {
                        "type": "array",
                        "description": "List of search queries (e.g., ['Artist - Song', 'Another Song'])",
                        "items": { "type": "string" }
                    }
                },
                "required": ["playlist_id", "search_queries"]
            }),
        },
        Tool {
            name: PLAYLIST_DETAILS.to_string(),
            description: "Retrieve details about a YouTube Music playlist including its tracks. \
                Returns all tracks unless a limit is given."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlist_id": {
                        "type": "string",
                        "description": "Playlist ID or URL to retrieve"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of tracks to return",
                        "minimum": 0
                    }
                },
                "required": ["playlist_id"]
            }),
        },
        Tool {
            name: LIBRARY_PLAYLISTS.to_string(),
            description: "Get the user's library playlists from YouTube Music. \
                Returns a list of playlists with their IDs and titles."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of playlists to return",
                        "default": 25,
                        "minimum": 1
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: UPDATE_PLAYLIST.to_string(),
            description: "Update the title and/or description of a YouTube playlist. \
                Fields that are not given keep their current value."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlist_id": {
                        "type": "string",
                        "description": "Playlist ID or URL to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New playlist title"
                    },
                    "description": {
                        "type": "string",
                        "description": "New playlist description"
                    }
                },
                "required": ["playlist_id"]
            }),
        },
        Tool {
            name: DELETE_PLAYLIST.to_string(),
            description: "Delete a YouTube playlist. This action cannot be undone.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "playlist_id": {
                        "type": "string",
                        "description": "Playlist ID or URL to delete"
                    }
                },
                "required": ["playlist_id"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_match_names() {
        let tools = get_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, TOOL_NAMES);
        assert!(tools.iter().all(|t| t.input_schema["type"] == "object"));
    }
}
