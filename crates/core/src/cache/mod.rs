//! Partitioned response cache.
//!
//! This module provides the named, versioned cache partitions the worker
//! serves from. It supports:
//!
//! - Versioned partition naming with stale-partition detection
//! - Normalized, content-addressed request keys (SHA-256)
//! - An injectable async `CacheStore` trait
//! - An in-memory store implementation for tests and the stdio driver

pub mod key;
pub mod memory;
pub mod store;

pub use key::CacheKey;
pub use memory::MemoryStore;
pub use store::CacheStore;

/// The current set of versioned partition names.
///
/// Bumping the version yields a disjoint set of names; anything outside the
/// current set is deleted during activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNames {
    /// App shell files seeded at install time.
    pub static_shell: String,
    /// Remote and local image bytes.
    pub images: String,
    /// General runtime partition, reserved but not written to.
    pub runtime: String,
}

impl PartitionNames {
    pub fn new(prefix: &str, version: u32) -> Self {
        Self {
            static_shell: format!("{prefix}-static-v{version}"),
            images: format!("{prefix}-images-v{version}"),
            runtime: format!("{prefix}-cache-v{version}"),
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [&self.static_shell, &self.images, &self.runtime]
    }

    /// Whether a partition name belongs to the current version set.
    pub fn is_current(&self, name: &str) -> bool {
        self.all().contains(&name)
    }
}
