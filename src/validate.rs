// src/validate.rs - Structural checks applied to each endpoint's response

use std::collections::{HashMap, HashSet};

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{EXPECTED_PLAYLIST_COUNT, EXPECTED_SONG_COUNT, SONGS_PER_PLAYLIST};
use crate::report::CheckOutcome;
use crate::time_block::TimeBlock;

/// Endpoints the API root must advertise.
pub const EXPECTED_ENDPOINTS: [&str; 4] = [
    "GET /api/current-playlist",
    "GET /api/playlist/:id",
    "GET /api/playlists",
    "GET /api/songs",
];

const PLAYLIST_FIELDS: [&str; 5] = ["id", "name", "time_block", "start_time", "end_time"];
const SONG_FIELDS: [&str; 5] = ["id", "playlist_id", "title", "artist", "time_block"];

/// Keys from `required` that `value` does not carry.
fn missing_fields<'a>(value: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| value.get(field).is_none())
        .collect()
}

/// Requires a 200 response carrying JSON; anything else becomes a failed
/// outcome with the status and raw body in the message.
fn parse_ok_json(status: StatusCode, body: &str) -> Result<Value, CheckOutcome> {
    if status != StatusCode::OK {
        return Err(CheckOutcome::fail(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body
        )));
    }
    serde_json::from_str(body).map_err(|e| CheckOutcome::fail(format!("Request failed: {}", e)))
}

/// Renders a JSON value for a message without quoting plain strings.
fn value_as_text(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn expected_block_labels() -> Vec<&'static str> {
    TimeBlock::ALL.iter().map(|b| b.as_str()).collect()
}

/// `GET /api/` - info document with a message, a version and the endpoint list.
pub fn check_root(status: StatusCode, body: &str) -> CheckOutcome {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return outcome,
    };

    let missing = missing_fields(&data, &["message", "version", "endpoints"]);
    if !missing.is_empty() {
        return CheckOutcome::fail_with(
            format!("Missing required fields: {:?}", missing),
            data,
        );
    }

    let advertised = data["endpoints"].as_array().cloned().unwrap_or_default();
    let endpoints_match = !advertised.is_empty()
        && EXPECTED_ENDPOINTS
            .iter()
            .all(|expected| advertised.iter().any(|v| v.as_str() == Some(*expected)));

    if endpoints_match {
        let count = advertised.len();
        CheckOutcome::pass_with(
            format!("API info returned successfully with {} endpoints", count),
            data,
        )
    } else {
        CheckOutcome::fail_with(
            format!("Expected endpoints not found. Got: {}", data["endpoints"]),
            data,
        )
    }
}

/// `GET /api/playlists` - exactly six playlists covering every time block.
/// On success the deduplicated playlist ids are returned alongside the
/// outcome, in catalog order; a failed check yields no ids at all.
pub fn check_playlists(status: StatusCode, body: &str) -> (CheckOutcome, Vec<String>) {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return (outcome, Vec::new()),
    };

    let playlists = match data.as_array() {
        Some(list) => list.clone(),
        None => {
            return (
                CheckOutcome::fail_with("Response should be a list", data),
                Vec::new(),
            )
        }
    };

    if playlists.len() != EXPECTED_PLAYLIST_COUNT {
        return (
            CheckOutcome::fail_with(
                format!(
                    "Expected {} playlists, got {}",
                    EXPECTED_PLAYLIST_COUNT,
                    playlists.len()
                ),
                data,
            ),
            Vec::new(),
        );
    }

    let mut ids = Vec::new();
    for playlist in &playlists {
        let missing = missing_fields(playlist, &PLAYLIST_FIELDS);
        if !missing.is_empty() {
            return (
                CheckOutcome::fail_with(
                    format!("Playlist missing fields: {:?}", missing),
                    playlist.clone(),
                ),
                Vec::new(),
            );
        }
        if let Some(id) = playlist["id"].as_str() {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }
    }

    let expected_blocks = expected_block_labels();
    let actual_blocks: Vec<String> = playlists
        .iter()
        .map(|p| value_as_text(&p["time_block"]))
        .collect();

    let expected_set: HashSet<&str> = expected_blocks.iter().copied().collect();
    let actual_set: HashSet<&str> = actual_blocks.iter().map(String::as_str).collect();
    if expected_set != actual_set {
        return (
            CheckOutcome::fail_with(
                format!(
                    "Expected time blocks {:?}, got {:?}",
                    expected_blocks, actual_blocks
                ),
                data,
            ),
            Vec::new(),
        );
    }

    (
        CheckOutcome::pass(format!(
            "Successfully retrieved {} playlists with all 6 time blocks",
            playlists.len()
        )),
        ids,
    )
}

/// `GET /api/songs` - eighteen songs, three per time block.
pub fn check_songs(status: StatusCode, body: &str) -> CheckOutcome {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return outcome,
    };

    let songs = match data.as_array() {
        Some(list) => list.clone(),
        None => return CheckOutcome::fail_with("Response should be a list", data),
    };

    if songs.len() != EXPECTED_SONG_COUNT {
        return CheckOutcome::fail_with(
            format!(
                "Expected {} songs (6 time blocks * 3 songs), got {}",
                EXPECTED_SONG_COUNT,
                songs.len()
            ),
            data,
        );
    }

    for song in &songs {
        let missing = missing_fields(song, &SONG_FIELDS);
        if !missing.is_empty() {
            return CheckOutcome::fail_with(
                format!("Song missing fields: {:?}", missing),
                song.clone(),
            );
        }
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for song in &songs {
        if let Some(block) = song["time_block"].as_str() {
            *counts.entry(block).or_insert(0) += 1;
        }
    }

    for block in expected_block_labels() {
        let count = counts.get(block).copied().unwrap_or(0);
        if count != SONGS_PER_PLAYLIST {
            return CheckOutcome::fail(format!(
                "Expected {} songs for {}, got {}",
                SONGS_PER_PLAYLIST, block, count
            ));
        }
    }

    CheckOutcome::pass(format!(
        "Successfully retrieved {} songs with proper time block distribution",
        songs.len()
    ))
}

/// `GET /api/current-playlist` - playlist, songs and the detected time block.
///
/// `hours` carries the local hour sampled just before and just after the
/// request; the reported block may legitimately match either when the run
/// straddles a four-hour boundary.
pub fn check_current_playlist(status: StatusCode, body: &str, hours: &[u32]) -> CheckOutcome {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return outcome,
    };

    let missing = missing_fields(&data, &["playlist", "songs", "current_time_block"]);
    if !missing.is_empty() {
        return CheckOutcome::fail_with(
            format!("Missing required fields: {:?}", missing),
            data,
        );
    }

    let playlist = data["playlist"].clone();
    let missing_playlist = missing_fields(&playlist, &PLAYLIST_FIELDS);
    if !missing_playlist.is_empty() {
        return CheckOutcome::fail_with(
            format!("Playlist missing fields: {:?}", missing_playlist),
            playlist,
        );
    }

    let song_count = match data["songs"].as_array() {
        Some(songs) if songs.len() == SONGS_PER_PLAYLIST => songs.len(),
        Some(songs) => {
            return CheckOutcome::fail_with(
                format!("Expected {} songs, got {}", SONGS_PER_PLAYLIST, songs.len()),
                data,
            )
        }
        None => {
            return CheckOutcome::fail_with(
                format!("Expected {} songs, got non-list", SONGS_PER_PLAYLIST),
                data,
            )
        }
    };

    let reported = value_as_text(&data["current_time_block"]);
    let block_matches = hours
        .iter()
        .any(|&hour| TimeBlock::for_hour(hour).as_str() == reported);

    if !block_matches {
        let observed_hour = hours.first().copied().unwrap_or_default();
        return CheckOutcome::fail(format!(
            "Time block detection incorrect. Current hour: {}, Expected: {}, Got: {}",
            observed_hour,
            TimeBlock::for_hour(observed_hour),
            reported
        ));
    }

    CheckOutcome::pass(format!(
        "Successfully retrieved current playlist for {} time block with {} songs",
        reported, song_count
    ))
}

/// `GET /api/playlist/:id` - the requested playlist plus its three songs.
pub fn check_playlist_by_id(status: StatusCode, body: &str, playlist_id: &str) -> CheckOutcome {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return outcome,
    };

    let missing = missing_fields(&data, &["playlist", "songs"]);
    if !missing.is_empty() {
        return CheckOutcome::fail_with(
            format!("Missing required fields: {:?}", missing),
            data,
        );
    }

    let returned_id = value_as_text(&data["playlist"]["id"]);
    if returned_id != playlist_id {
        return CheckOutcome::fail(format!(
            "Requested playlist ID {}, got {}",
            playlist_id, returned_id
        ));
    }

    let song_count = match data["songs"].as_array() {
        Some(songs) if songs.len() == SONGS_PER_PLAYLIST => songs.len(),
        Some(songs) => {
            return CheckOutcome::fail(format!(
                "Expected {} songs, got {}",
                SONGS_PER_PLAYLIST,
                songs.len()
            ))
        }
        None => {
            return CheckOutcome::fail(format!(
                "Expected {} songs, got non-list",
                SONGS_PER_PLAYLIST
            ))
        }
    };

    let name = data["playlist"]["name"].as_str().unwrap_or_default();
    CheckOutcome::pass(format!(
        "Successfully retrieved playlist '{}' with {} songs",
        name, song_count
    ))
}

/// `GET /api/playlist/:id/songs` - three songs, each owned by the playlist.
pub fn check_playlist_songs(status: StatusCode, body: &str, playlist_id: &str) -> CheckOutcome {
    let data = match parse_ok_json(status, body) {
        Ok(data) => data,
        Err(outcome) => return outcome,
    };

    let songs = match data.as_array() {
        Some(list) => list.clone(),
        None => return CheckOutcome::fail_with("Response should be a list", data),
    };

    if songs.len() != SONGS_PER_PLAYLIST {
        return CheckOutcome::fail(format!(
            "Expected {} songs, got {}",
            SONGS_PER_PLAYLIST,
            songs.len()
        ));
    }

    for song in &songs {
        let missing = missing_fields(song, &SONG_FIELDS);
        if !missing.is_empty() {
            return CheckOutcome::fail_with(
                format!("Song missing fields: {:?}", missing),
                song.clone(),
            );
        }

        let owner = value_as_text(&song["playlist_id"]);
        if owner != playlist_id {
            return CheckOutcome::fail(format!(
                "Song playlist_id {} doesn't match requested {}",
                owner, playlist_id
            ));
        }
    }

    CheckOutcome::pass(format!(
        "Successfully retrieved {} songs for playlist {}",
        songs.len(),
        playlist_id
    ))
}

/// `GET /api/playlist/:id` with an unknown id - must 404 with an error body.
pub fn check_invalid_playlist(status: StatusCode, body: &str) -> CheckOutcome {
    if status != StatusCode::NOT_FOUND {
        return CheckOutcome::fail(format!("Expected 404, got HTTP {}", status.as_u16()));
    }

    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => return CheckOutcome::fail(format!("Request failed: {}", e)),
    };

    if data.get("error").is_some() {
        CheckOutcome::pass("Correctly returned 404 for invalid playlist ID")
    } else {
        CheckOutcome::fail_with("404 response missing error field", data)
    }
}
