//! Cache Entry Module
//!
//! Defines a single cached response payload and its insertion time.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload plus the moment it was inserted.
///
/// Entries are never mutated in place; re-adding a key builds a new entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response body
    payload: Bytes,
    /// Monotonic insertion instant, used for staleness
    created_at: Instant,
    /// Wall-clock insertion time, for display
    inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
            inserted_at: Utc::now(),
        }
    }

    /// Returns the stored payload. Cloning `Bytes` only bumps a refcount.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn inserted_at(&self) -> DateTime<Utc> {
        self.inserted_at
    }

    // == Age ==
    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is still
    /// fresh. It only becomes stale once its age strictly exceeds `ttl`.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
