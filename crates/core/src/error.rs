//! Unified error types for offcache.

use crate::config::ConfigError;

/// Unified error types for the offline cache worker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A seed resource failed to fetch during install; nothing was persisted.
    #[error("install failed: {0}")]
    InstallFailed(String),

    /// Cache store operation failed.
    #[error("cache store error: {0}")]
    Store(String),

    /// Network-level fetch failure.
    #[error("network error: {0}")]
    Network(String),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Lifecycle method called out of order.
    #[error("invalid lifecycle transition: {0}")]
    Lifecycle(String),

    /// Request handling attempted before activation completed.
    #[error("worker is not active")]
    NotActive,

    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InstallFailed("/favicon.png: connection refused".to_string());
        assert!(err.to_string().contains("install failed"));
        assert!(err.to_string().contains("/favicon.png"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = ConfigError::LoadFailed("bad toml".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
