//! In-memory cache store.
//!
//! Uses a HashMap of partitions under a tokio RwLock for concurrent access.
//! Backs the test suite and the stdio driver; production embeddings inject
//! their own `CacheStore` over the host's cache storage.

use super::key::CacheKey;
use super::store::CacheStore;
use crate::Error;
use crate::http::Response;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored entry with its write timestamp.
struct Entry {
    response: Response,
    stored_at: DateTime<Utc>,
}

/// In-memory implementation of [`CacheStore`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    partitions: Arc<RwLock<HashMap<String, HashMap<CacheKey, Entry>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a partition, for diagnostics.
    pub async fn len(&self, partition: &str) -> usize {
        let partitions = self.partitions.read().await;
        partitions.get(partition).map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, partition: &str) -> Result<(), Error> {
        let mut partitions = self.partitions.write().await;
        partitions.entry(partition.to_string()).or_default();
        Ok(())
    }

    async fn get(&self, partition: &str, key: &CacheKey) -> Result<Option<Response>, Error> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|p| p.get(key))
            .map(|entry| entry.response.clone()))
    }

    async fn put(&self, partition: &str, key: &CacheKey, response: Response) -> Result<(), Error> {
        let mut partitions = self.partitions.write().await;
        let entry = Entry { response, stored_at: Utc::now() };
        tracing::debug!("storing {key} in {partition} at {}", entry.stored_at.to_rfc3339());
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(key.clone(), entry);
        Ok(())
    }

    async fn match_any(&self, key: &CacheKey) -> Result<Option<Response>, Error> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .values()
            .find_map(|p| p.get(key))
            .map(|entry| entry.response.clone()))
    }

    async fn delete_partition(&self, partition: &str) -> Result<bool, Error> {
        let mut partitions = self.partitions.write().await;
        Ok(partitions.remove(partition).is_some())
    }

    async fn partition_names(&self) -> Result<Vec<String>, Error> {
        let partitions = self.partitions.read().await;
        let mut names: Vec<String> = partitions.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseSource;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};
    use url::Url;

    fn make_response(body: &'static [u8]) -> Response {
        Response::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(body), ResponseSource::Network)
    }

    fn make_key(url: &str) -> CacheKey {
        CacheKey::from_url(&Url::parse(url).unwrap())
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::new();
        let key = make_key("https://macosplay.com/favicon.png");

        store.put("images-v1", &key, make_response(b"icon")).await.unwrap();

        let hit = store.get("images-v1", &key).await.unwrap().unwrap();
        assert_eq!(hit.body.as_ref(), b"icon");
    }

    #[tokio::test]
    async fn test_get_miss() {
        let store = MemoryStore::new();
        let key = make_key("https://macosplay.com/missing.png");
        assert!(store.get("images-v1", &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_silently() {
        let store = MemoryStore::new();
        let key = make_key("https://macosplay.com/a.png");

        store.put("images-v1", &key, make_response(b"old")).await.unwrap();
        store.put("images-v1", &key, make_response(b"new")).await.unwrap();

        let hit = store.get("images-v1", &key).await.unwrap().unwrap();
        assert_eq!(hit.body.as_ref(), b"new");
        assert_eq!(store.len("images-v1").await, 1);
    }

    #[tokio::test]
    async fn test_match_any_searches_all_partitions() {
        let store = MemoryStore::new();
        let key = make_key("https://macosplay.com/images/placeholder.png");

        store.put("static-v1", &key, make_response(b"ph")).await.unwrap();

        let hit = store.match_any(&key).await.unwrap().unwrap();
        assert_eq!(hit.body.as_ref(), b"ph");
        assert!(store.match_any(&make_key("https://macosplay.com/other")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_creates_empty_partition() {
        let store = MemoryStore::new();
        store.open("runtime-v1").await.unwrap();
        assert_eq!(store.partition_names().await.unwrap(), vec!["runtime-v1".to_string()]);
        assert_eq!(store.len("runtime-v1").await, 0);
    }

    #[tokio::test]
    async fn test_delete_partition() {
        let store = MemoryStore::new();
        let key = make_key("https://macosplay.com/a.png");
        store.put("images-v1", &key, make_response(b"x")).await.unwrap();

        assert!(store.delete_partition("images-v1").await.unwrap());
        assert!(!store.delete_partition("images-v1").await.unwrap());
        assert!(store.get("images-v1", &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partition_names_sorted() {
        let store = MemoryStore::new();
        store.open("b-cache").await.unwrap();
        store.open("a-cache").await.unwrap();
        assert_eq!(store.partition_names().await.unwrap(), vec!["a-cache".to_string(), "b-cache".to_string()]);
    }
}
