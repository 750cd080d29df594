//! Plain-text rendering of tool results.

use crate::music::{
    AddItemsOutcome, BatchResult, CreatedPlaylist, DeletedPlaylist, Playlist, PlaylistSummary,
    Track, UpdatedPlaylist,
};

fn artists_or_unknown(track: &Track) -> String {
    let names: Vec<String> = track
        .artist_names()
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        "Unknown Artist".to_string()
    } else {
        names.join(", ")
    }
}

pub fn search_results(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return "No results found.".to_string();
    }

    let mut lines = vec![format!("Found {} results:\n", tracks.len())];
    for track in tracks {
        let album = track
            .album
            .as_ref()
            .map(|a| format!(" [{}]", a))
            .unwrap_or_default();
        let duration = track
            .duration
            .as_ref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        lines.push(format!(
            "- {} - {}{}{}\n  videoId: {}",
            track.title,
            artists_or_unknown(track),
            album,
            duration,
            track.video_id.as_deref().unwrap_or("unavailable")
        ));
    }
    lines.join("\n")
}

pub fn created_playlist(created: &CreatedPlaylist) -> String {
    format!(
        "Created playlist: {}\nPlaylist ID: {}\nURL: {}",
        created.title, created.playlist_id, created.url
    )
}

pub fn added_items(outcome: &AddItemsOutcome) -> String {
    let mut text = format!(
        "Successfully added {} of {} tracks to playlist {}",
        outcome.added_count, outcome.requested_count, outcome.playlist_id
    );
    if !outcome.failed_video_ids.is_empty() {
        text.push_str(&format!(
            "\nFailed to add: {}",
            outcome.failed_video_ids.join(", ")
        ));
    }
    text
}

pub fn batch_result(result: &BatchResult) -> String {
    let mut lines = vec![format!("Added {} tracks to playlist:\n", result.added_count)];
    for track in &result.added_tracks {
        lines.push(format!(
            "  {} -> {} by {}",
            track.query,
            track.matched,
            track.artists.join(", ")
        ));
    }

    if result.confirmed_count < result.added_count {
        lines.push(format!(
            "\nOnly {} of {} matched tracks were accepted by the playlist.",
            result.confirmed_count, result.added_count
        ));
    }
    if !result.failed_queries.is_empty() {
        lines.push(format!("\nFailed to find: {}", result.failed_queries.join(", ")));
    }
    lines.join("\n")
}

pub fn playlist_details(playlist: &Playlist) -> String {
    let mut lines = vec![
        format!("Playlist: {}", playlist.title),
        format!(
            "Description: {}",
            playlist.description.as_deref().unwrap_or("No description")
        ),
        format!("Track Count: {}", playlist.track_count),
        String::new(),
        "Tracks:".to_string(),
    ];

    for track in &playlist.tracks {
        let title = if track.title.is_empty() { "Unknown" } else { &track.title };
        lines.push(format!("  - {} - {}", title, track.artist_names().join(", ")));
    }
    if playlist.truncated {
        lines.push(format!(
            "  ... showing the first {} of {} tracks",
            playlist.tracks.len(),
            playlist.track_count
        ));
    }
    lines.join("\n")
}

pub fn library_playlists(playlists: &[PlaylistSummary]) -> String {
    if playlists.is_empty() {
        return "No playlists found in your library.".to_string();
    }

    let mut lines = vec![format!("Found {} playlists:\n", playlists.len())];
    for playlist in playlists {
        let count = if playlist.count > 0 {
            format!(" ({} tracks)", playlist.count)
        } else {
            String::new()
        };
        lines.push(format!(
            "  - {}{}\n    playlistId: {}",
            playlist.title, count, playlist.playlist_id
        ));
    }
    lines.join("\n")
}

pub fn updated_playlist(updated: &UpdatedPlaylist) -> String {
    let description = if updated.description.is_empty() {
        "No description"
    } else {
        &updated.description
    };
    format!(
        "Updated playlist: {}\nPlaylist ID: {}\nDescription: {}",
        updated.title, updated.playlist_id, description
    )
}

pub fn deleted_playlist(deleted: &DeletedPlaylist) -> String {
    format!("Deleted playlist: {}", deleted.playlist_id)
}
