//! Worker configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (OFFCACHE_*)
//! 2. TOML config file (if OFFCACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cache::PartitionNames;

mod validation;

pub use validation::ConfigError;

/// Worker configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (OFFCACHE_*)
/// 2. TOML config file (if OFFCACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Prefix for partition names.
    ///
    /// Set via OFFCACHE_CACHE_PREFIX environment variable.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,

    /// Partition version. Bumping it disjoins the partition name set and
    /// lets activation reclaim storage from earlier versions.
    ///
    /// Set via OFFCACHE_CACHE_VERSION environment variable.
    #[serde(default = "default_cache_version")]
    pub cache_version: u32,

    /// Origin of the controlled scope. Same-origin requests take the static
    /// strategy; seed paths are resolved against it.
    ///
    /// Set via OFFCACHE_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Seed resources cached at install time, as absolute paths.
    ///
    /// Set via OFFCACHE_STATIC_SEEDS environment variable (comma-separated).
    #[serde(default = "default_static_seeds")]
    pub static_seeds: Vec<String>,

    /// External image-hosting hostnames routed to the image strategy.
    /// Matched as substrings of the request hostname.
    ///
    /// Set via OFFCACHE_IMAGE_HOSTS environment variable (comma-separated).
    #[serde(default = "default_image_hosts")]
    pub image_hosts: Vec<String>,

    /// Local placeholder image served when an image fetch fails.
    ///
    /// Set via OFFCACHE_PLACEHOLDER_PATH environment variable.
    #[serde(default = "default_placeholder_path")]
    pub placeholder_path: String,

    /// Offline fallback document for failed navigations.
    ///
    /// Set via OFFCACHE_OFFLINE_PATH environment variable.
    #[serde(default = "default_offline_path")]
    pub offline_path: String,

    /// User-Agent string for network fetches.
    ///
    /// Set via OFFCACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Network fetch timeout in milliseconds.
    ///
    /// Set via OFFCACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to buffer per response.
    ///
    /// Set via OFFCACHE_MAX_BODY_BYTES environment variable.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_cache_prefix() -> String {
    "macosplay".into()
}

fn default_cache_version() -> u32 {
    1
}

fn default_origin() -> String {
    "https://macosplay.com".into()
}

fn default_static_seeds() -> Vec<String> {
    vec!["/".into(), "/offline.html".into(), "/favicon.png".into()]
}

fn default_image_hosts() -> Vec<String> {
    vec!["file.macosplay.com".into(), "pocketbase".into()]
}

fn default_placeholder_path() -> String {
    "/images/placeholder.png".into()
}

fn default_offline_path() -> String {
    "/offline.html".into()
}

fn default_user_agent() -> String {
    "offcache/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_prefix: default_cache_prefix(),
            cache_version: default_cache_version(),
            origin: default_origin(),
            static_seeds: default_static_seeds(),
            image_hosts: default_image_hosts(),
            placeholder_path: default_placeholder_path(),
            offline_path: default_offline_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl WorkerConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Partition names for the configured prefix and version.
    pub fn partition_names(&self) -> PartitionNames {
        PartitionNames::new(&self.cache_prefix, self.cache_version)
    }

    /// Parsed origin URL. Validation guarantees this parses after `load`.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.origin).map_err(|e| ConfigError::Invalid {
            field: "origin".into(),
            reason: e.to_string(),
        })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `OFFCACHE_`
    /// 2. TOML file from `OFFCACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("OFFCACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("OFFCACHE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
