//! Shared Cache Handle
//!
//! Wraps a [`CacheStore`] in the single lock every caller and the reaper go
//! through, and owns the reaper's lifecycle.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;
use crate::tasks::spawn_reaper;

// == Cache Config ==
/// Timing parameters for a [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries older than this are removed by the next sweep
    pub ttl: Duration,
    /// How often the reaper wakes up to sweep
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Uses one interval as both the staleness threshold and the sweep period.
    pub fn new(interval: Duration) -> Self {
        Self {
            ttl: interval,
            sweep_interval: interval,
        }
    }

    /// Overrides the sweep period, leaving the TTL unchanged.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Rejects zero durations.
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidInterval { name: "ttl" });
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidInterval {
                name: "sweep_interval",
            });
        }
        Ok(())
    }
}

// == Cache ==
/// Cloneable handle to a response cache with a background reaper.
///
/// Every clone shares the same store. The reaper stops when [`Cache::shutdown`]
/// is called or once the last clone is dropped.
#[derive(Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<Mutex<CacheStore>>,
    config: CacheConfig,
    shutdown_tx: watch::Sender<bool>,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache whose TTL and sweep period are both `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        Self::with_config(CacheConfig::new(interval))
    }

    /// Creates a cache with independent TTL and sweep period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_config(config: CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;

        let store = Arc::new(Mutex::new(CacheStore::new(config.ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(store.clone(), config.sweep_interval, shutdown_rx);

        info!(ttl = ?config.ttl, sweep_interval = ?config.sweep_interval, "Cache initialized");

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                config,
                shutdown_tx,
                reaper: Mutex::new(Some(reaper)),
            }),
        })
    }

    pub fn config(&self) -> CacheConfig {
        self.inner.config
    }

    // == Add ==
    /// Stores `payload` under `key`, replacing any previous entry.
    pub async fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let key = key.into();
        debug!(%key, "Cache add");
        self.inner.store.lock().await.add(key, payload.into());
    }

    // == Get ==
    /// Returns the payload cached under `key`, if any.
    ///
    /// A hit does not extend the entry's lifetime.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let payload = self.inner.store.lock().await.get(key);
        debug!(key, hit = payload.is_some(), "Cache lookup");
        payload
    }

    // == Sweep Now ==
    /// Runs one sweep immediately instead of waiting for the reaper.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep_now(&self) -> usize {
        self.inner.store.lock().await.sweep_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.store.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.store.lock().await.is_empty()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Calling this more than once is harmless, and concurrent callers all
    /// return only once the reaper is gone. The cache stays usable
    /// afterwards, but nothing is swept any more.
    pub async fn shutdown(&self) -> Result<(), CacheError> {
        // Held until the join completes so a concurrent call waits here.
        let mut reaper = self.inner.reaper.lock().await;
        let Some(handle) = reaper.as_mut() else {
            return Ok(());
        };

        // The reaper holds the only receiver, so this fails only if it already exited.
        let _ = self.inner.shutdown_tx.send(true);

        let joined = handle.await;
        *reaper = None;
        joined.map_err(|err| CacheError::Reaper(err.to_string()))
    }

    /// Returns true while the reaper task is alive.
    pub async fn is_reaping(&self) -> bool {
        self.inner
            .reaper
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
