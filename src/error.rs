//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building or stopping the response cache.
///
/// `add` and `get` have no failure path; only configuration and reaper
/// lifecycle can go wrong.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A zero duration was supplied for the TTL or the sweep interval
    #[error("Invalid interval: {name} must be greater than zero")]
    InvalidInterval { name: &'static str },

    /// The background reaper panicked or was aborted
    #[error("Reaper task failed: {0}")]
    Reaper(String),
}

// == Pokedex Error Enum ==
/// Unified error type for the fetch layer and the REPL.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache lifecycle failure
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Response failed with status code {status}: {url}")]
    Status { status: u16, url: String },

    /// The API payload did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// First word of the input matched no command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command was invoked without its required argument
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
