//! Available commands and argument parsing

use crate::error::{PokedexError, Result};

/// Help-table entry for one command.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub name: &'static str,
    /// Required argument, shown as `<arg>` in help
    pub argument: Option<&'static str>,
    pub description: &'static str,
}

/// All available commands, in help order
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        argument: None,
        description: "Show all commands",
    },
    CommandInfo {
        name: "map",
        argument: None,
        description: "Get a list of the next 20 location areas in the Pokemon world",
    },
    CommandInfo {
        name: "mapb",
        argument: None,
        description: "Get a list of the previous 20 location areas in the Pokemon world",
    },
    CommandInfo {
        name: "explore",
        argument: Some("area"),
        description: "List the Pokemon found in a location area",
    },
    CommandInfo {
        name: "catch",
        argument: Some("pokemon"),
        description: "Throw a Pokeball at a Pokemon",
    },
    CommandInfo {
        name: "inspect",
        argument: Some("pokemon"),
        description: "Show details of a Pokemon you have caught",
    },
    CommandInfo {
        name: "pokedex",
        argument: None,
        description: "List every Pokemon you have caught",
    },
    CommandInfo {
        name: "cache",
        argument: None,
        description: "Show response cache statistics",
    },
    CommandInfo {
        name: "exit",
        argument: None,
        description: "Exit the Pokedex",
    },
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    CacheStats,
    Exit,
}

impl Command {
    /// Parses cleaned input words.
    ///
    /// Returns `Ok(None)` for an empty line. Extra words after the first
    /// argument are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let arg = |command: &'static str, argument: &'static str| {
            args.first()
                .cloned()
                .ok_or(PokedexError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Self::Help,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg("explore", "area")?),
            "catch" => Self::Catch(arg("catch", "pokemon")?),
            "inspect" => Self::Inspect(arg("inspect", "pokemon")?),
            "pokedex" => Self::Pokedex,
            "cache" => Self::CacheStats,
            "exit" => Self::Exit,
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}
