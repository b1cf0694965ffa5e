//! Session state and command execution
//!
//! A session owns the pagination cursor and the caught-Pokemon collection.
//! Both live only as long as the process.

use std::collections::BTreeMap;
use std::io::Write;

use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::commands::{Command, COMMANDS};
use super::ACCENT;
use crate::api::{FetchSource, PokeApiClient};
use crate::catch::attempt_catch;
use crate::error::Result;
use crate::models::Pokemon;

/// What the REPL should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Pagination cursor over the location-area listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Set once any page has been shown
    pub started: bool,
}

#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    pagination: Pagination,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            pagination: Pagination::default(),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Caught Pokemon, keyed by name.
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing command");
        match command {
            Command::Help => self.help(out)?,
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::CacheStats => self.cache_stats(out).await?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            match info.argument {
                Some(arg) => writeln!(out, "{} <{}>: {}", info.name, arg, info.description)?,
                None => writeln!(out, "{}: {}", info.name, info.description)?,
            }
        }
        writeln!(out)?;
        Ok(())
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.pagination.started && self.pagination.next.is_none() {
            writeln!(out, "You're on the last page.")?;
            return Ok(());
        }
        let url = self.pagination.next.clone();
        self.show_page(url.as_deref(), out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.pagination.previous.clone() else {
            writeln!(out, "You're on the first page.")?;
            return Ok(());
        };
        self.show_page(Some(url.as_str()), out).await
    }

    async fn show_page<W: Write>(&mut self, url: Option<&str>, out: &mut W) -> Result<()> {
        let (page, source) = self.client.location_areas(url).await?;
        notice_if_cached(source, out)?;

        self.pagination = Pagination {
            next: page.next,
            previous: page.previous,
            started: true,
        };
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let (location, source) = self.client.location_area(area).await?;
        notice_if_cached(source, out)?;

        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let (pokemon, source) = self.client.pokemon(name).await?;
        notice_if_cached(source, out)?;

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;
        if attempt_catch(&mut self.rng, pokemon.base_experience) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.type_.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty.")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let stats = self.client.cache().stats().await;
        writeln!(out, "Cached responses: {}", stats.total_entries)?;
        writeln!(out, "Hits: {}", stats.hits)?;
        writeln!(out, "Misses: {}", stats.misses)?;
        writeln!(out, "Reaped: {}", stats.reaped)?;
        writeln!(out, "Hit rate: {:.1}%", stats.hit_rate() * 100.0)?;
        if let Some(oldest) = stats.oldest_inserted_at {
            writeln!(out, "Oldest entry: {}", oldest.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        Ok(())
    }
}

fn notice_if_cached<W: Write>(source: FetchSource, out: &mut W) -> Result<()> {
    if source == FetchSource::Cache {
        writeln!(out, "{}", "Using cached data".with(ACCENT))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::cache::Cache;

    // Nothing listens here; every test below is answered from the cache.
    const BASE: &str = "http://127.0.0.1:9/api/v2";

    const PIKACHU: &str = r#"{
        "name": "pikachu",
        "base_experience": 1,
        "height": 4,
        "weight": 60,
        "stats": [{"base_stat": 35, "stat": {"name": "hp", "url": ""}}],
        "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}]
    }"#;

    fn session() -> Session {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = PokeApiClient::new(reqwest::Client::new(), cache, BASE);
        Session::with_rng(client, StdRng::seed_from_u64(42))
    }

    async fn run(session: &mut Session, command: Command) -> String {
        let mut out = Vec::new();
        session.execute(command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let mut session = session();
        let output = run(&mut session, Command::Help).await;

        assert!(output.starts_with("Welcome to the Pokedex!"));
        for info in COMMANDS {
            assert!(output.contains(info.name), "missing {}", info.name);
        }
        assert!(output.contains("catch <pokemon>:"));
    }

    #[tokio::test]
    async fn test_exit_ends_session() {
        let mut session = session();
        let mut out = Vec::new();

        let flow = session.execute(Command::Exit, &mut out).await.unwrap();

        assert_eq!(flow, Flow::Exit);
        assert_eq!(String::from_utf8(out).unwrap(), "Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_map_back_on_first_page() {
        let mut session = session();
        let output = run(&mut session, Command::MapBack).await;
        assert_eq!(output, "You're on the first page.\n");
    }

    #[tokio::test]
    async fn test_inspect_before_catch() {
        let mut session = session();
        let output = run(&mut session, Command::Inspect("pikachu".to_string())).await;
        assert_eq!(output, "you have not caught that pokemon\n");
    }

    #[tokio::test]
    async fn test_empty_pokedex() {
        let mut session = session();
        let output = run(&mut session, Command::Pokedex).await;
        assert_eq!(output, "Your Pokedex is empty.\n");
    }

    #[tokio::test]
    async fn test_catch_then_inspect() {
        let mut session = session();
        session
            .client()
            .cache()
            .add(format!("{}/pokemon/pikachu", BASE), PIKACHU)
            .await;

        for _ in 0..50 {
            run(&mut session, Command::Catch("pikachu".to_string())).await;
            if session.pokedex().contains_key("pikachu") {
                break;
            }
        }
        assert!(session.pokedex().contains_key("pikachu"));

        let output = run(&mut session, Command::Inspect("pikachu".to_string())).await;
        assert!(output.contains("Name: pikachu"));
        assert!(output.contains("Height: 4"));
        assert!(output.contains("  -hp: 35"));
        assert!(output.contains("  - electric"));

        let output = run(&mut session, Command::Pokedex).await;
        assert_eq!(output, "Your Pokedex:\n - pikachu\n");
    }

    #[tokio::test]
    async fn test_catch_reports_cached_data() {
        let mut session = session();
        session
            .client()
            .cache()
            .add(format!("{}/pokemon/pikachu", BASE), PIKACHU)
            .await;

        let output = run(&mut session, Command::Catch("pikachu".to_string())).await;

        assert!(output.contains("Using cached data"));
        assert!(output.contains("Throwing a Pokeball at pikachu..."));
    }

    #[tokio::test]
    async fn test_cache_stats_output() {
        let mut session = session();
        session.client().cache().add("key", "value").await;
        session.client().cache().get("key").await;

        let output = run(&mut session, Command::CacheStats).await;

        assert!(output.contains("Cached responses: 1"));
        assert!(output.contains("Hits: 1"));
        assert!(output.contains("Hit rate: 100.0%"));
        assert!(output.contains("Oldest entry: "));
    }

    #[tokio::test]
    async fn test_cache_stats_without_entries() {
        let mut session = session();

        let output = run(&mut session, Command::CacheStats).await;

        assert!(output.contains("Cached responses: 0"));
        assert!(!output.contains("Oldest entry"));
    }
}
