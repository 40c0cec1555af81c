//! Cache-first request strategies.
//!
//! Both strategies share the same shape: serve a cached copy if present,
//! otherwise fetch and opportunistically populate the cache, and absorb
//! every failure into a fallback or synthetic response. Nothing here
//! returns an error to the caller.
//!
//! The response handed to the cache-write path is a duplicate of the one
//! returned to the caller; `Bytes` bodies make that duplication cheap.

use offcache_core::http::{Request, Response, ResponseSource};
use offcache_core::{CacheKey, CacheStore, PartitionNames};

use crate::fetch::Fetcher;

/// Fixed lookups the strategies need beyond the request itself.
pub(crate) struct StrategyContext<'a> {
    pub names: &'a PartitionNames,
    pub placeholder_key: &'a CacheKey,
    pub offline_key: &'a CacheKey,
}

/// Image strategy: cache-first, populate-on-miss, placeholder-on-error.
///
/// Seeded resources with image paths live in the static-shell partition,
/// so a miss in the image partition falls through to an any-partition
/// match before going to the network.
///
/// Non-ok network responses are returned as-is without fallback; only
/// transport-level failures reach the placeholder path.
pub(crate) async fn image<S, F>(store: &S, fetcher: &F, ctx: &StrategyContext<'_>, request: &Request) -> Response
where
    S: CacheStore,
    F: Fetcher,
{
    let key = CacheKey::from_request(request);

    if let Some(hit) = lookup(store, &ctx.names.images, &key).await {
        tracing::debug!("image served from cache: {}", request.url);
        return hit.with_source(ResponseSource::Cache);
    }
    if let Some(hit) = lookup_any(store, &key).await {
        tracing::debug!("image served from another partition: {}", request.url);
        return hit.with_source(ResponseSource::Cache);
    }

    match fetcher.fetch(request).await {
        Ok(response) => {
            if response.is_ok() {
                let copy = response.clone();
                if let Err(e) = store.put(&ctx.names.images, &key, copy).await {
                    tracing::warn!("failed to cache image {}: {e}", request.url);
                } else {
                    tracing::debug!("image cached: {}", request.url);
                }
            }
            response
        }
        Err(e) => {
            tracing::warn!("image fetch failed for {}: {e}", request.url);
            match lookup_any(store, ctx.placeholder_key).await {
                Some(placeholder) => placeholder.with_source(ResponseSource::Fallback),
                None => Response::not_found("Image not available"),
            }
        }
    }
}

/// Static strategy: cache-first, populate-on-miss, offline-fallback for
/// failed navigations.
pub(crate) async fn static_shell<S, F>(store: &S, fetcher: &F, ctx: &StrategyContext<'_>, request: &Request) -> Response
where
    S: CacheStore,
    F: Fetcher,
{
    let key = CacheKey::from_request(request);

    if let Some(hit) = lookup(store, &ctx.names.static_shell, &key).await {
        return hit.with_source(ResponseSource::Cache);
    }

    match fetcher.fetch(request).await {
        Ok(response) => {
            if response.is_ok() {
                let copy = response.clone();
                if let Err(e) = store.put(&ctx.names.static_shell, &key, copy).await {
                    tracing::warn!("failed to cache static asset {}: {e}", request.url);
                }
            }
            response
        }
        Err(e) => {
            tracing::warn!("static fetch failed for {}: {e}", request.url);
            if request.is_navigation()
                && let Some(offline) = lookup_any(store, ctx.offline_key).await
            {
                return offline.with_source(ResponseSource::Fallback);
            }
            Response::not_found("Resource not available")
        }
    }
}

/// Cache-read failures are treated as misses.
async fn lookup<S: CacheStore>(store: &S, partition: &str, key: &CacheKey) -> Option<Response> {
    match store.get(partition, key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!("cache read failed in {partition}, treating as miss: {e}");
            None
        }
    }
}

async fn lookup_any<S: CacheStore>(store: &S, key: &CacheKey) -> Option<Response> {
    match store.match_any(key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!("any-partition cache read failed, treating as miss: {e}");
            None
        }
    }
}
