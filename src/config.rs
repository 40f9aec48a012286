use std::env;
use std::time::Duration;

// Target configuration
pub const DEFAULT_BASE_URL: &str = "https://salil-music.preview.emergentagent.com";
pub const API_PREFIX: &str = "/api";

// Request handling - one synchronous round trip at a time
pub const REQUEST_TIMEOUT_SECS: u64 = 10;  // Per-request timeout
pub const CHECK_PAUSE_MS: u64 = 500;  // Pause between checks, politeness only

// Expected catalog shape
pub const EXPECTED_PLAYLIST_COUNT: usize = 6;
pub const SONGS_PER_PLAYLIST: usize = 3;
pub const EXPECTED_SONG_COUNT: usize = EXPECTED_PLAYLIST_COUNT * SONGS_PER_PLAYLIST;

// Probe id for the not-found check
pub const INVALID_PLAYLIST_ID: &str = "invalid-playlist-id-12345";

#[derive(Debug, Clone)]
pub struct Config {
    /// Site root of the deployment under test, without the `/api` prefix.
    pub base_url: String,
    pub request_timeout: Duration,
    pub check_pause: Duration,
}

impl Config {
    /// Reads the target from the environment. `NEXT_PUBLIC_BASE_URL` names
    /// the deployment under test; timeout and pause accept overrides in the
    /// same style.
    pub fn from_env() -> Self {
        let base_url = env::var("NEXT_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        let pause_ms = env::var("CHECK_PAUSE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(CHECK_PAUSE_MS);

        Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            check_pause: Duration::from_millis(pause_ms),
        }
    }

    /// Base URL with the `/api` prefix appended and trailing slashes trimmed.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), API_PREFIX)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            check_pause: Duration::from_millis(CHECK_PAUSE_MS),
        }
    }
}
