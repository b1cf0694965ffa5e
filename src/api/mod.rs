//! API Module
//!
//! HTTP access to the PokeAPI, always through the response cache.
//!
//! # Endpoints used
//! - `GET /location-area/` - Paginated list of location areas
//! - `GET /location-area/{name}` - One area and its Pokemon encounters
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::{FetchSource, Fetched, PokeApiClient};
