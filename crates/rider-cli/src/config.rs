//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rider_core::SchedulePolicy;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the production file (artists plus inventory).
    pub production_file: PathBuf,

    /// Minute-of-day below which set times roll over to the prior
    /// festival day.
    pub day_rollover_min: i32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("production_file", &self.production_file)
            .field("day_rollover_min", &self.day_rollover_min)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            production_file: data_dir.join("production.json"),
            day_rollover_min: SchedulePolicy::default().day_rollover_min,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RIDER_*)
        figment = figment.merge(Env::prefixed("RIDER_"));

        figment.extract()
    }

    /// The schedule normalization policy this configuration selects.
    #[must_use]
    pub const fn schedule_policy(&self) -> SchedulePolicy {
        SchedulePolicy {
            day_rollover_min: self.day_rollover_min,
        }
    }
}

/// Returns the platform-specific config directory for rider.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rider"))
}

/// Returns the platform-specific data directory for rider.
///
/// On Linux: `~/.local/share/rider`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rider"))
}
