// Shared test support: a stub backend speaking just enough HTTP/1.1 for the
// probe, plus a canned catalog matching the deployed sample data.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use playlist_probe::{Config, Playlist, Song, TimeBlock};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A listener serving canned responses keyed by request path. Every request
/// is answered with `Connection: close` so each check opens a fresh socket.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

pub async fn spawn_backend(routes: HashMap<String, (u16, String)>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(Mutex::new(Vec::new()));

    let routes = Arc::new(routes);
    let hit_log = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            let hits = hit_log.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) => break,
                        Ok(n) => {
                            request.extend_from_slice(&chunk[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                        Err(_) => return,
                    }
                }

                let head = String::from_utf8_lossy(&request);
                let path = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                hits.lock().unwrap().push(path.clone());

                let (status, body) = routes.get(&path).cloned().unwrap_or_else(|| {
                    (404, json!({"error": format!("Route {} not found", path)}).to_string())
                });
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    500 => "Internal Server Error",
                    _ => "Unknown",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubServer {
        base_url: format!("http://{}", addr),
        hits,
    }
}

/// Probe configuration aimed at a stub server, with the politeness pause
/// turned off so test runs stay fast.
pub fn probe_config(server: &StubServer) -> Config {
    Config {
        base_url: server.base_url.clone(),
        request_timeout: Duration::from_secs(5),
        check_pause: Duration::ZERO,
    }
}

/// The six scheduled playlists the deployment seeds itself with.
pub fn sample_playlists() -> Vec<Playlist> {
    let catalog = [
        ("dawn-serenity", "Dawn Serenity", TimeBlock::EarlyMorning),
        ("coffee-energy", "Coffee & Energy", TimeBlock::Morning),
        ("afternoon-flow", "Afternoon Flow", TimeBlock::Afternoon),
        ("golden-hour", "Golden Hour", TimeBlock::Evening),
        ("night-vibes", "Night Vibes", TimeBlock::Night),
        ("deep-sleep", "Deep Sleep", TimeBlock::LateNight),
    ];

    catalog
        .into_iter()
        .map(|(id, name, block)| {
            let (start, end) = block.hour_range();
            Playlist {
                id: id.to_string(),
                name: name.to_string(),
                time_block: block.as_str().to_string(),
                start_time: format!("{:02}:00", start),
                end_time: format!("{:02}:00", end % 24),
            }
        })
        .collect()
}

/// Three songs per block, wired to the matching playlist's id.
pub fn sample_songs(playlists: &[Playlist]) -> Vec<Song> {
    let catalog: [(&str, [(&str, &str); 3]); 6] = [
        (
            "early-morning",
            [
                ("Morning Mist", "Nature Sounds"),
                ("Gentle Sunrise", "Ambient Dreams"),
                ("Bird Song Symphony", "Forest Echoes"),
            ],
        ),
        (
            "morning",
            [
                ("Fresh Start", "Positive Vibes"),
                ("Morning Motivation", "Upbeat Collective"),
                ("New Day Rising", "Energy Boost"),
            ],
        ),
        (
            "afternoon",
            [
                ("Focus Mode", "Productivity Mix"),
                ("Steady Rhythm", "Work Beats"),
                ("Creative Energy", "Flow State"),
            ],
        ),
        (
            "evening",
            [
                ("Sunset Dreams", "Chill Collective"),
                ("Evening Breeze", "Relaxed Vibes"),
                ("Twilight Glow", "Ambient Hour"),
            ],
        ),
        (
            "night",
            [
                ("City Lights", "Urban Nights"),
                ("Midnight Groove", "Night Owls"),
                ("Starlit Sky", "Evening Jazz"),
            ],
        ),
        (
            "late-night",
            [
                ("Peaceful Slumber", "Sleep Sounds"),
                ("Night Rain", "Calm Waters"),
                ("Dream State", "Soft Melodies"),
            ],
        ),
    ];

    let mut songs = Vec::new();
    for (block, tracks) in catalog {
        let playlist_id = playlists
            .iter()
            .find(|p| p.time_block == block)
            .map(|p| p.id.clone())
            .unwrap_or_default();
        for (n, (title, artist)) in tracks.into_iter().enumerate() {
            songs.push(Song {
                id: format!("song-{}-{}", block, n + 1),
                playlist_id: playlist_id.clone(),
                title: title.to_string(),
                artist: artist.to_string(),
                time_block: block.to_string(),
            });
        }
    }
    songs
}

/// Info document served at the API root.
pub fn root_info() -> Value {
    json!({
        "message": "Salil Music Player API",
        "version": "1.0.0",
        "endpoints": [
            "GET /api/current-playlist",
            "GET /api/playlist/:id",
            "GET /api/playlists",
            "GET /api/songs"
        ]
    })
}

/// A complete, well-behaved backend: every endpoint answers the way the
/// deployed API should.
pub fn healthy_routes() -> HashMap<String, (u16, String)> {
    let playlists = sample_playlists();
    let songs = sample_songs(&playlists);
    let mut routes = HashMap::new();

    routes.insert("/api/".to_string(), (200, root_info().to_string()));
    routes.insert(
        "/api/playlists".to_string(),
        (200, serde_json::to_string(&playlists).unwrap()),
    );
    routes.insert(
        "/api/songs".to_string(),
        (200, serde_json::to_string(&songs).unwrap()),
    );

    let current_block = TimeBlock::current();
    let current = playlists
        .iter()
        .find(|p| p.time_block == current_block.as_str())
        .unwrap();
    let current_songs: Vec<&Song> = songs
        .iter()
        .filter(|s| s.playlist_id == current.id)
        .collect();
    routes.insert(
        "/api/current-playlist".to_string(),
        (
            200,
            json!({
                "playlist": current,
                "songs": current_songs,
                "current_time_block": current_block.as_str(),
            })
            .to_string(),
        ),
    );

    let first = &playlists[0];
    let first_songs: Vec<&Song> = songs
        .iter()
        .filter(|s| s.playlist_id == first.id)
        .collect();
    routes.insert(
        format!("/api/playlist/{}", first.id),
        (
            200,
            json!({
                "playlist": first,
                "songs": first_songs,
            })
            .to_string(),
        ),
    );
    routes.insert(
        format!("/api/playlist/{}/songs", first.id),
        (200, serde_json::to_string(&first_songs).unwrap()),
    );

    routes.insert(
        format!(
            "/api/playlist/{}",
            playlist_probe::config::INVALID_PLAYLIST_ID
        ),
        (404, json!({"error": "Playlist not found"}).to_string()),
    );

    routes
}
