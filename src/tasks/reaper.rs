//! Cache Reaper Task
//!
//! Background task that periodically removes stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps stale entries out of `store`.
///
/// The first sweep happens one `sweep_interval` after spawning, then once per
/// interval. Each sweep takes the store's lock, so it is serialized with every
/// `add` and `get`. Staleness is judged against the store's own TTL.
///
/// The task stops when `true` is sent on `shutdown` or when the sender is
/// dropped. It is checked between sweeps, never in the middle of one.
///
/// # Panics
/// Panics if `sweep_interval` is zero or if called outside a tokio runtime.
/// [`crate::cache::Cache`] validates the interval before calling this.
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    sweep_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?sweep_interval, "Starting cache reaper");

        let mut ticker = time::interval_at(first_sweep_at(sweep_interval), sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock().await;
                        let removed = guard.sweep_expired();
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        debug!(removed, remaining, "Cache sweep removed stale entries");
                    } else {
                        trace!(remaining, "Cache sweep found nothing stale");
                    }
                }
                changed = shutdown.changed() => {
                    // Err means every sender is gone: the cache handle was dropped.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}

/// Deadline of the first sweep, one `sweep_interval` from now.
///
/// Intervals too long to add to the current instant park the first sweep
/// 30 years out instead of overflowing.
fn first_sweep_at(sweep_interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(sweep_interval)
        .unwrap_or_else(|| now + FAR_FUTURE)
}

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn shared_store(ttl: Duration) -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(ttl)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_stale_entries() {
        let interval = Duration::from_millis(100);
        let store = shared_store(interval);
        let (_tx, rx) = watch::channel(false);

        store
            .lock()
            .await
            .add("expire_soon".to_string(), Bytes::from_static(b"value"));

        let handle = spawn_reaper(store.clone(), interval, rx);

        time::sleep(interval * 3).await;

        assert!(
            store.lock().await.get("expire_soon").is_none(),
            "Stale entry should have been reaped"
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let store = shared_store(Duration::from_secs(3600));
        let (_tx, rx) = watch::channel(false);

        store
            .lock()
            .await
            .add("long_lived".to_string(), Bytes::from_static(b"value"));

        let handle = spawn_reaper(store.clone(), Duration::from_millis(50), rx);

        time::sleep(Duration::from_millis(500)).await;

        assert_eq!(
            store.lock().await.get("long_lived"),
            Some(Bytes::from_static(b"value")),
            "Fresh entry should not be removed"
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_on_signal() {
        let store = shared_store(Duration::from_millis(100));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_reaper(store, Duration::from_millis(100), rx);

        tx.send(true).unwrap();
        handle.await.expect("Reaper should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_when_sender_dropped() {
        let store = shared_store(Duration::from_millis(100));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_reaper(store, Duration::from_millis(100), rx);

        drop(tx);
        handle.await.expect("Reaper should exit cleanly");
    }

    #[test]
    fn test_first_sweep_at_saturates_on_huge_interval() {
        let before = Instant::now();

        let at = first_sweep_at(Duration::from_secs(u64::MAX));
        assert!(at >= before + FAR_FUTURE);

        let at = first_sweep_at(Duration::from_millis(100));
        assert!(at >= before + Duration::from_millis(100));
        assert!(at < before + FAR_FUTURE);
    }

    #[tokio::test]
    async fn test_reaper_survives_huge_interval() {
        let store = shared_store(Duration::from_secs(u64::MAX));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_reaper(store, Duration::from_secs(u64::MAX), rx);

        tokio::task::yield_now().await;
        assert!(!handle.is_finished(), "Reaper should still be waiting");

        tx.send(true).unwrap();
        handle.await.expect("Reaper should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_sweeps_empty_store_without_error() {
        let store = shared_store(Duration::from_millis(10));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_reaper(store.clone(), Duration::from_millis(10), rx);

        time::sleep(Duration::from_millis(100)).await;
        assert!(store.lock().await.is_empty());
        assert!(!handle.is_finished());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
