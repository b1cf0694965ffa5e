//! PokeAPI payload models
//!
//! Only the fields the Pokedex displays are modelled; everything else in the
//! API responses is ignored during deserialization.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

use serde::Deserialize;

/// A `{ name, url }` reference, the API's standard link to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}
