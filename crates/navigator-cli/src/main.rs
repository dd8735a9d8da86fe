use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use navigator_cli::logging::{init_logging, LoggingConfig};
use navigator_cli::output::{ClassReport, JumpReport};
use navigator_lib::{DistanceCache, DistanceCacheConfig, EsiClient, EsiConfig, LocationId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Jump distances between solar systems")]
struct Cli {
    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count the jumps between two systems using the ESI route service.
    Jumps {
        /// Origin system id.
        #[arg(long = "from", allow_negative_numbers = true)]
        from: LocationId,
        /// Destination system id.
        #[arg(long = "to", allow_negative_numbers = true)]
        to: LocationId,
    },
    /// Report whether a system name is excluded from routing.
    Classify {
        /// System display name.
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        logging = logging.verbose();
    }
    init_logging(&logging);

    match cli.command {
        Command::Jumps { from, to } => handle_jumps(from, to, cli.json).await,
        Command::Classify { name } => handle_classify(&name, cli.json),
    }
}

async fn handle_jumps(from: LocationId, to: LocationId, json: bool) -> Result<()> {
    let esi_config = EsiConfig::from_env().context("failed to read ESI configuration")?;
    let cache_config =
        DistanceCacheConfig::from_env().context("failed to read cache configuration")?;
    let client = Arc::new(EsiClient::new(esi_config).context("failed to build ESI client")?);
    let cache = DistanceCache::with_config(client.clone(), client, cache_config);
    tracing::debug!(from, to, "resolving jump distance");

    let jumps = cache
        .ensure_route(from, to)
        .await
        .with_context(|| format!("cannot resolve jumps from {from} to {to}"))?;
    let report = JumpReport::new(from, to, jumps, cache.lookup(from, to).as_ref());

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn handle_classify(name: &str, json: bool) -> Result<()> {
    let report = ClassReport::new(name);
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}
