//! Core types and shared functionality for offcache.
//!
//! This crate provides:
//! - Partitioned cache store abstraction with an in-memory implementation
//! - Request/response model for intercepted fetches
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod http;

pub use cache::{CacheKey, CacheStore, MemoryStore, PartitionNames};
pub use config::WorkerConfig;
pub use error::Error;
pub use crate::http::{Destination, Request, RequestMode, Response, ResponseSource};
