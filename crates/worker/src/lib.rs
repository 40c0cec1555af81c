//! Offline cache worker for offcache.
//!
//! This crate provides the cache manager that intercepts outbound fetches:
//! request classification, cache-first strategies with failure fallbacks,
//! and the install/activate partition lifecycle.

pub mod classify;
pub mod fetch;
pub mod manager;

mod strategy;

pub use classify::{Route, classify};
pub use fetch::{FetchError, Fetcher, HttpFetcher, UrlError, canonicalize};
pub use manager::{CacheManager, LifecycleState};
