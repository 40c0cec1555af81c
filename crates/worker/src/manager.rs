//! The cache manager: partition lifecycle and request interception.
//!
//! Lifecycle ordering is enforced here: `install` always completes before
//! `activate`, and `handle` refuses requests until activation is done. The
//! host's skip-waiting and claim-clients signals collapse into `run`, which
//! promotes a freshly installed instance immediately.

use offcache_core::http::{Request, Response};
use offcache_core::{CacheKey, CacheStore, Error, PartitionNames, WorkerConfig};
use url::Url;

use crate::classify::{Route, classify};
use crate::fetch::Fetcher;
use crate::strategy::{self, StrategyContext};

/// Lifecycle phase of a worker instance.
///
/// `InstallFailed` is terminal: a previous version (if any) keeps serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Installing,
    Installed,
    Activating,
    Active,
    InstallFailed,
}

/// Owns the partition set, the injected store and fetcher, and the two
/// decision flows: setup lifecycle and per-request routing.
pub struct CacheManager<S, F> {
    store: S,
    fetcher: F,
    config: WorkerConfig,
    origin: Url,
    names: PartitionNames,
    placeholder_key: CacheKey,
    offline_key: CacheKey,
    state: LifecycleState,
}

impl<S, F> CacheManager<S, F>
where
    S: CacheStore,
    F: Fetcher,
{
    /// Construct a manager for a validated configuration.
    pub fn new(config: WorkerConfig, store: S, fetcher: F) -> Result<Self, Error> {
        let origin = config.origin_url()?;
        let names = config.partition_names();
        let placeholder_key = CacheKey::from_url(&join_path(&origin, &config.placeholder_path)?);
        let offline_key = CacheKey::from_url(&join_path(&origin, &config.offline_path)?);

        Ok(Self {
            store,
            fetcher,
            config,
            origin,
            names,
            placeholder_key,
            offline_key,
            state: LifecycleState::Installing,
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn partition_names(&self) -> &PartitionNames {
        &self.names
    }

    /// Install: seed the static-shell partition.
    ///
    /// All-or-nothing: every seed is fetched before anything is written, so
    /// a single failure leaves no partial install behind.
    pub async fn install(&mut self) -> Result<(), Error> {
        if self.state != LifecycleState::Installing {
            return Err(Error::Lifecycle(format!("install called in state {:?}", self.state)));
        }

        tracing::info!("installing: caching {} seed resources", self.config.static_seeds.len());

        let mut seeds = Vec::with_capacity(self.config.static_seeds.len());
        for path in &self.config.static_seeds {
            let url = join_path(&self.origin, path)?;
            let request = Request::get(url);
            let response = match self.fetcher.fetch(&request).await {
                Ok(response) if response.is_ok() => response,
                Ok(response) => {
                    self.state = LifecycleState::InstallFailed;
                    return Err(Error::InstallFailed(format!("seed {path} returned status {}", response.status)));
                }
                Err(e) => {
                    self.state = LifecycleState::InstallFailed;
                    return Err(Error::InstallFailed(format!("seed {path}: {e}")));
                }
            };
            seeds.push((CacheKey::from_request(&request), response));
        }

        self.store.open(&self.names.static_shell).await?;
        for (key, response) in seeds {
            if let Err(e) = self.store.put(&self.names.static_shell, &key, response).await {
                self.state = LifecycleState::InstallFailed;
                return Err(e);
            }
        }

        self.state = LifecycleState::Installed;
        tracing::info!("install complete, skipping waiting phase");
        Ok(())
    }

    /// Activate: delete every partition outside the current version set,
    /// then start intercepting requests.
    pub async fn activate(&mut self) -> Result<(), Error> {
        if self.state != LifecycleState::Installed {
            return Err(Error::Lifecycle(format!("activate called in state {:?}", self.state)));
        }
        self.state = LifecycleState::Activating;

        for name in self.store.partition_names().await? {
            if !self.names.is_current(&name) {
                tracing::info!("deleting stale cache partition {name}");
                self.store.delete_partition(&name).await?;
            }
        }

        self.state = LifecycleState::Active;
        tracing::info!("activation complete, claiming open clients");
        Ok(())
    }

    /// Install and activate in one step.
    pub async fn run(&mut self) -> Result<(), Error> {
        self.install().await?;
        self.activate().await
    }

    /// Intercept one request. `Ok(None)` means the request is left to
    /// default network behavior (ignored or pass-through routes).
    ///
    /// Handled routes always produce a response; failures are absorbed into
    /// fallbacks or synthetic 404s and never surface as errors.
    pub async fn handle(&self, request: &Request) -> Result<Option<Response>, Error> {
        if self.state != LifecycleState::Active {
            return Err(Error::NotActive);
        }

        let ctx = StrategyContext {
            names: &self.names,
            placeholder_key: &self.placeholder_key,
            offline_key: &self.offline_key,
        };

        match classify(request, &self.origin, &self.config.image_hosts) {
            Route::Ignored => {
                tracing::debug!("ignoring {} {}", request.method, request.url);
                Ok(None)
            }
            Route::Passthrough => {
                tracing::debug!("passing through {}", request.url);
                Ok(None)
            }
            Route::Image => Ok(Some(strategy::image(&self.store, &self.fetcher, &ctx, request).await)),
            Route::Static => Ok(Some(strategy::static_shell(&self.store, &self.fetcher, &ctx, request).await)),
        }
    }
}

fn join_path(origin: &Url, path: &str) -> Result<Url, Error> {
    origin
        .join(path)
        .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
}
