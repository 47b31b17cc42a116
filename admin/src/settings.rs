//! Layered settings: `.env`, an optional TOML file, then `LIBRARY_*`
//! environment variables. CLI flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5086";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONFIG_FILE: &str = "library.toml";
const CONFIG_FILE_ENV: &str = "LIBRARY_CONFIG";
const ENV_PREFIX: &str = "LIBRARY";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the library API; `/api` is appended by the client.
    #[serde(default = "Settings::default_api_url")]
    pub api_url: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "Settings::default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            log_level: Self::default_log_level(),
        }
    }
}

impl Settings {
    fn default_api_url() -> String {
        DEFAULT_API_URL.to_string()
    }

    fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_string()
    }

    /// Load from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        // A missing `.env` is fine.
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_sources(&path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(path: &Path, environment: config::Environment) -> anyhow::Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("failed to build configuration from {}", path.display()))?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.api_url = settings.api_url.trim().to_string();
        if settings.api_url.is_empty() {
            bail!("api_url must not be empty");
        }
        Ok(settings)
    }
}
