// Library exports for playlist-probe crate
// This allows integration tests to access the public API

pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod report;
pub mod time_block;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{ProbeError, Result};
pub use models::{Playlist, Song};
pub use probe::{ApiProbe, Check};
pub use report::{CheckOutcome, RunSummary, TestResult};
pub use time_block::TimeBlock;
