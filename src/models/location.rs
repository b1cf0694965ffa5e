//! Location area payloads
//!
//! `GET /location-area/` returns a paginated list; `GET /location-area/{name}`
//! returns one area with its encounters.

use serde::Deserialize;

use super::NamedResource;

/// One page of the location-area listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// Full URL of the next page, if any
    pub next: Option<String>,
    /// Full URL of the previous page, if any
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of every Pokemon that can be encountered here, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
