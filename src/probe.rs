// src/probe.rs - Runs the endpoint checks in order against a live deployment

use std::fmt;

use chrono::{Local, Timelike};
use reqwest::{Client, StatusCode};

use crate::config::{Config, INVALID_PLAYLIST_ID};
use crate::error::Result;
use crate::models::Playlist;
use crate::report::{CheckOutcome, RunSummary, TestResult};
use crate::validate;

/// The seven endpoint checks, named the way they appear in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Root,
    AllPlaylists,
    AllSongs,
    CurrentPlaylist,
    SpecificPlaylist,
    PlaylistSongs,
    InvalidPlaylistId,
}

impl Check {
    /// Execution order. The playlists check discovers the ids the two
    /// per-playlist checks depend on, so it has to run before them.
    pub const ALL: [Check; 7] = [
        Check::Root,
        Check::AllPlaylists,
        Check::AllSongs,
        Check::CurrentPlaylist,
        Check::SpecificPlaylist,
        Check::PlaylistSongs,
        Check::InvalidPlaylistId,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Check::Root => "Root API Endpoint",
            Check::AllPlaylists => "All Playlists Endpoint",
            Check::AllSongs => "All Songs Endpoint",
            Check::CurrentPlaylist => "Current Playlist Endpoint",
            Check::SpecificPlaylist => "Specific Playlist Endpoint",
            Check::PlaylistSongs => "Playlist Songs Endpoint",
            Check::InvalidPlaylistId => "Invalid Playlist ID Handling",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Drives the check sequence and accumulates the per-check results.
pub struct ApiProbe {
    config: Config,
    client: Client,
    playlist_ids: Vec<String>,
    results: Vec<TestResult>,
}

impl ApiProbe {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            config,
            client,
            playlist_ids: Vec::new(),
            results: Vec::new(),
        })
    }

    /// Ids discovered by a fully successful playlists check, in catalog order.
    pub fn playlist_ids(&self) -> &[String] {
        &self.playlist_ids
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }

    async fn fetch(&self, path: &str) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.config.api_base(), path);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("{} -> HTTP {} ({} bytes)", url, status.as_u16(), body.len());
        Ok((status, body))
    }

    /// Fetches a path and hands the response to a validator; transport
    /// failures become a failed outcome instead of aborting the run.
    async fn fetch_outcome<F>(&self, path: &str, validator: F) -> CheckOutcome
    where
        F: FnOnce(StatusCode, &str) -> CheckOutcome,
    {
        match self.fetch(path).await {
            Ok((status, body)) => validator(status, &body),
            Err(e) => CheckOutcome::fail(e.to_string()),
        }
    }

    async fn evaluate(&mut self, check: Check) -> CheckOutcome {
        match check {
            Check::Root => self.fetch_outcome("/", validate::check_root).await,

            Check::AllPlaylists => match self.fetch("/playlists").await {
                Ok((status, body)) => {
                    let (outcome, ids) = validate::check_playlists(status, &body);
                    if outcome.success {
                        if let Ok(playlists) = serde_json::from_str::<Vec<Playlist>>(&body) {
                            let names: Vec<&str> =
                                playlists.iter().map(|p| p.name.as_str()).collect();
                            log::debug!("Discovered playlists: {:?}", names);
                        }
                        self.playlist_ids = ids;
                    }
                    outcome
                }
                Err(e) => CheckOutcome::fail(e.to_string()),
            },

            Check::AllSongs => self.fetch_outcome("/songs", validate::check_songs).await,

            Check::CurrentPlaylist => {
                // Sample the clock on both sides of the request so a run that
                // straddles a block boundary is not reported as a failure.
                let hour_before = Local::now().hour();
                let fetched = self.fetch("/current-playlist").await;
                let hour_after = Local::now().hour();

                let mut hours = vec![hour_before];
                if hour_after != hour_before {
                    hours.push(hour_after);
                }

                match fetched {
                    Ok((status, body)) => {
                        validate::check_current_playlist(status, &body, &hours)
                    }
                    Err(e) => CheckOutcome::fail(e.to_string()),
                }
            }

            Check::SpecificPlaylist => match self.playlist_ids.first().cloned() {
                Some(id) => {
                    let path = format!("/playlist/{}", id);
                    self.fetch_outcome(&path, |status, body| {
                        validate::check_playlist_by_id(status, body, &id)
                    })
                    .await
                }
                None => CheckOutcome::fail("No playlist IDs available from previous tests"),
            },

            Check::PlaylistSongs => match self.playlist_ids.first().cloned() {
                Some(id) => {
                    let path = format!("/playlist/{}/songs", id);
                    self.fetch_outcome(&path, |status, body| {
                        validate::check_playlist_songs(status, body, &id)
                    })
                    .await
                }
                None => CheckOutcome::fail("No playlist IDs available from previous tests"),
            },

            Check::InvalidPlaylistId => {
                let path = format!("/playlist/{}", INVALID_PLAYLIST_ID);
                self.fetch_outcome(&path, validate::check_invalid_playlist)
                    .await
            }
        }
    }

    /// Stamps and stores the outcome, echoing it to the console as it lands.
    fn record(&mut self, check: Check, outcome: CheckOutcome) -> bool {
        let result = TestResult::record(check.title(), outcome);

        let status = if result.success { "✅ PASS" } else { "❌ FAIL" };
        println!("{}: {}", status, result.test);
        println!("   {}", result.message);
        if !result.success {
            if let Some(payload) = &result.response_data {
                if let Ok(pretty) = serde_json::to_string_pretty(payload) {
                    println!("   Response: {}", pretty);
                }
            }
        }
        println!();

        let success = result.success;
        self.results.push(result);
        success
    }

    /// Runs every check in order and reports to stdout. A transport or
    /// validation failure never stops the sequence; each check still gets
    /// its own verdict. Returns whether the whole run passed.
    pub async fn run_all(&mut self) -> bool {
        println!("🎵 Starting Salil Music Player Backend API Tests");
        println!("🌐 Testing API at: {}", self.config.api_base());
        println!("{}", "=".repeat(60));

        let total = Check::ALL.len();
        let mut passed = 0;

        for (i, check) in Check::ALL.into_iter().enumerate() {
            log::debug!("Running check: {}", check);
            let outcome = self.evaluate(check).await;
            if self.record(check, outcome) {
                passed += 1;
            }
            if i + 1 < total && !self.config.check_pause.is_zero() {
                tokio::time::sleep(self.config.check_pause).await;
            }
        }

        println!("{}", "=".repeat(60));
        println!("🏁 Test Results: {}/{} tests passed", passed, total);

        if passed == total {
            println!("✅ All backend API tests PASSED!");
            true
        } else {
            println!("❌ {} tests FAILED!", total - passed);
            false
        }
    }
}
