//! Normalized, content-addressed cache key generation.

use crate::http::Request;
use sha2::{Digest, Sha256};
use url::Url;

/// A normalized request key: the canonical URL (fragment stripped) hashed
/// with SHA-256 and rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Compute the key for a URL. The fragment never reaches the server, so
    /// it is excluded from the key.
    pub fn from_url(url: &Url) -> Self {
        let mut normalized = url.clone();
        normalized.set_fragment(None);

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_str().as_bytes());
        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn from_request(request: &Request) -> Self {
        Self::from_url(&request.url)
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
