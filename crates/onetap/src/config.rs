//! Configuration management for Onetap.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use onetap_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_STORE_WARN_THRESHOLD, DEFAULT_STORE_WATCH_INTERVAL_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,

    /// Code store monitoring
    #[serde(default)]
    pub store: StoreConfig,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Code store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Outstanding-code count that triggers a growth warning
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: usize,

    /// How often the watcher samples the store, in seconds
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            warn_threshold: default_warn_threshold(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_warn_threshold() -> usize { DEFAULT_STORE_WARN_THRESHOLD }
fn default_watch_interval() -> u64 { DEFAULT_STORE_WATCH_INTERVAL_SECS }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors: CorsConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
