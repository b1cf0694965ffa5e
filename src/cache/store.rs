//! Cache Store Module
//!
//! The unsynchronised core of the response cache: a map from request key to
//! timestamped payload. Callers share it through [`crate::cache::Cache`],
//! which wraps it in a single mutex.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-to-payload storage with age-based sweeping.
#[derive(Debug)]
pub struct CacheStore {
    /// Cached payloads keyed by request URL
    entries: HashMap<String, CacheEntry>,
    /// Entries older than this are removed by a sweep
    ttl: Duration,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose sweeps remove entries older than `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`.
    ///
    /// Replacing restarts the entry's age; nothing from the old entry survives.
    pub fn add(&mut self, key: String, payload: Bytes) {
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Looks up the payload for `key`.
    ///
    /// This is a plain lookup: it does not check staleness and does not
    /// refresh the entry's age. Only a sweep removes old entries.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.payload().clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose age exceeds the store's TTL.
    ///
    /// Returns the number of entries removed. Sweeping an empty store is a
    /// no-op returning 0.
    pub fn sweep_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - self.entries.len();

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats.oldest_inserted_at = self
            .entries
            .values()
            .map(CacheEntry::inserted_at)
            .min();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
