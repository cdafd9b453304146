//! Server configuration
//!
//! Loaded from a TOML file; every key has a compiled default so a missing
//! file or a partial file is fine. Command-line arguments override file
//! values (see `main.rs`).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Pipeline server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interval of the periodic position-report / audio-underflow-check timer
    pub position_report_interval_ms: u64,

    /// Delay of the one-shot source-setup-finish timer
    pub source_setup_timeout_ms: u64,

    /// How far playback may run past the newest pushed audio sample before
    /// the audio stream is considered starved
    pub audio_stall_threshold_ms: u64,

    /// Default tracing filter, overridable via RUST_LOG
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            position_report_interval_ms: 250,
            source_setup_timeout_ms: 200,
            audio_stall_threshold_ms: 500,
            log_filter: "mediabridge_server=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// `None` yields the compiled defaults; a named file that cannot be read
    /// or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    pub fn position_report_interval(&self) -> Duration {
        Duration::from_millis(self.position_report_interval_ms)
    }

    pub fn source_setup_timeout(&self) -> Duration {
        Duration::from_millis(self.source_setup_timeout_ms)
    }

    /// Stall threshold in pipeline clock units (nanoseconds).
    pub fn audio_stall_threshold_ns(&self) -> i64 {
        self.audio_stall_threshold_ms as i64 * 1_000_000
    }
}
