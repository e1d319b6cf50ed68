//! Engine configuration.
//!
//! Values come from the environment with sane defaults; a malformed value is
//! logged and replaced by its default rather than failing start-up.

use std::path::PathBuf;

use tracing::warn;

use petcare_pets::{DEFAULT_DECAY_PER_HOUR, DEFAULT_SLEEP_DURATION_SECS};

pub const ENV_SLEEP_DURATION_SECS: &str = "PETCARE_SLEEP_DURATION_SECS";
pub const ENV_DECAY_PER_HOUR: &str = "PETCARE_DECAY_PER_HOUR";
pub const ENV_STORAGE_PATH: &str = "PETCARE_STORAGE_PATH";

/// Runtime knobs of the lifecycle engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Length of a nap started through `start_sleep`.
    pub sleep_duration_secs: u64,
    /// Units lost by every need per elapsed hour.
    pub decay_per_hour: f64,
    /// Where the JSON file store lives (`None` = keep pets in memory).
    pub storage_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sleep_duration_secs: DEFAULT_SLEEP_DURATION_SECS,
            decay_per_hour: DEFAULT_DECAY_PER_HOUR,
            storage_path: None,
        }
    }
}

impl EngineConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sleep_duration_secs = match lookup(ENV_SLEEP_DURATION_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(key = ENV_SLEEP_DURATION_SECS, value = %raw, "invalid sleep duration, using default");
                    defaults.sleep_duration_secs
                }
            },
            None => defaults.sleep_duration_secs,
        };

        let decay_per_hour = match lookup(ENV_DECAY_PER_HOUR) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() && rate >= 0.0 => rate,
                _ => {
                    warn!(key = ENV_DECAY_PER_HOUR, value = %raw, "invalid decay rate, using default");
                    defaults.decay_per_hour
                }
            },
            None => defaults.decay_per_hour,
        };

        let storage_path = lookup(ENV_STORAGE_PATH)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            sleep_duration_secs,
            decay_per_hour,
            storage_path,
        }
    }

    pub fn with_sleep_duration_secs(mut self, secs: u64) -> Self {
        self.sleep_duration_secs = secs;
        self
    }

    pub fn with_decay_per_hour(mut self, rate: f64) -> Self {
        self.decay_per_hour = rate;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }
}
