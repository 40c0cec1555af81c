//! Injectable cache store abstraction.

use super::key::CacheKey;
use crate::Error;
use crate::http::Response;
use async_trait::async_trait;

/// A named, partitioned response store.
///
/// Partitions are created lazily on first `open` or `put`. Individual
/// operations are atomic; no operation spans multiple partitions or keys.
/// Implementations must tolerate concurrent puts for the same key (last
/// write wins; both writes carry equivalent data for the same key).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Ensure a partition exists.
    async fn open(&self, partition: &str) -> Result<(), Error>;

    /// Look up a key in one partition. `Ok(None)` on a miss.
    async fn get(&self, partition: &str, key: &CacheKey) -> Result<Option<Response>, Error>;

    /// Store a response under a key, overwriting silently.
    async fn put(&self, partition: &str, key: &CacheKey, response: Response) -> Result<(), Error>;

    /// Look up a key across all partitions, in unspecified order.
    async fn match_any(&self, key: &CacheKey) -> Result<Option<Response>, Error>;

    /// Delete a whole partition. Returns whether it existed.
    async fn delete_partition(&self, partition: &str) -> Result<bool, Error>;

    /// Names of all existing partitions.
    async fn partition_names(&self) -> Result<Vec<String>, Error>;
}
