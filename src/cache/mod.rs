//! Cache Module
//!
//! Time-bounded, in-memory cache for raw API responses keyed by request URL.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::{Cache, CacheConfig};
pub use stats::CacheStats;
pub use store::CacheStore;
