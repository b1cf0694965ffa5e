//! Pokedex - An interactive PokeAPI client
//!
//! Pages through location areas, explores them, and catches Pokemon, with a
//! time-bounded response cache in front of every HTTP request.

pub mod api;
pub mod cache;
pub mod catch;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::{Cache, CacheConfig};
pub use config::Config;
pub use error::{CacheError, PokedexError};
pub use repl::Session;
