//! Runtime settings
//!
//! Built-in defaults, optionally overlaid with a settings file named on the
//! command line. Nothing is read implicitly: without `--config` every run is
//! one test against Cloudflare, saved to `db/speeds.db`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "db/speeds.db";
pub const DEFAULT_BASE_URL: &str = "https://speed.cloudflare.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite file holding the measurement table
    pub database_path: PathBuf,
    pub backend: BackendSettings,
}

/// Knobs for the HTTP speed test backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    /// Size of the single download transfer
    pub download_bytes: u64,
    /// Size of the single upload transfer
    pub upload_bytes: usize,
    /// Round trips averaged (median) into the latency figure
    pub latency_samples: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_bytes: 25_000_000,
            upload_bytes: 10_000_000,
            latency_samples: 5,
        }
    }
}

impl Settings {
    /// Loads the defaults, overlaid with `config_file` when one is given.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder()?;
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let backend = BackendSettings::default();
        Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("backend.base_url", backend.base_url)?
            .set_default("backend.download_bytes", backend.download_bytes)?
            .set_default("backend.upload_bytes", backend.upload_bytes as u64)?
            .set_default("backend.latency_samples", backend.latency_samples as u64)
    }
}
