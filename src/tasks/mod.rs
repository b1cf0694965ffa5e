//! Background Tasks Module
//!
//! Contains background tasks that run alongside the REPL.
//!
//! # Tasks
//! - Cache reaper: removes stale cache entries at a fixed interval

mod reaper;

pub use reaper::spawn_reaper;
