//! Pokedex - An interactive PokeAPI client
//!
//! Binary entry point: wires configuration, cache, HTTP client and REPL
//! together, then stops the cache reaper on the way out.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{Cache, Config, PokeApiClient, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so logs stay out of REPL output)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the API client around the cache
/// 5. Run the REPL on stdin/stdout until `exit` or EOF
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so the REPL stays quiet; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, sweep_interval={}s, api_base_url={}",
        config.cache_ttl, config.sweep_interval, config.api_base_url
    );

    let cache = Cache::with_config(config.cache_config()).context("failed to create cache")?;
    let client =
        PokeApiClient::with_timeout(cache.clone(), &config.api_base_url, config.http_timeout())
            .context("failed to build HTTP client")?;

    let mut session = Session::new(client);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let outcome = pokedex::repl::run(&mut session, stdin, &mut stdout).await;

    cache.shutdown().await.context("failed to stop cache reaper")?;
    info!("Pokedex shutdown complete");

    outcome.context("REPL terminated")
}
