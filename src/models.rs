// src/models.rs - Payload shapes returned by the playlist API

use serde::{Deserialize, Serialize};

/// A scheduled playlist as returned by `/api/playlists` and
/// `/api/playlist/:id`. Times are `HH:MM` strings straight from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub time_block: String,
    pub start_time: String,
    pub end_time: String,
}

/// A song as returned by `/api/songs` and the per-playlist song listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub playlist_id: String,
    pub title: String,
    pub artist: String,
    pub time_block: String,
}
