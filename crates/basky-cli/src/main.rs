mod locations;
mod products;
mod render;

use std::process::ExitCode;

use basky_core::AppConfig;
use basky_platforms::{BlinkitClient, QuickCommercePlatform, ZeptoClient};
use basky_session::{FileStore, LocationValidator, SystemClock, ValidatedLocationCache};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "basky")]
#[command(about = "Search Zepto and Blinkit for groceries at a delivery location")]
struct Cli {
    /// Print `{success, ..., error}` JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Talk to Zepto.
    Zepto {
        #[command(subcommand)]
        command: PlatformCommands,
    },
    /// Talk to Blinkit.
    Blinkit {
        #[command(subcommand)]
        command: PlatformCommands,
    },
}

#[derive(Debug, Subcommand)]
enum PlatformCommands {
    /// Autocomplete a delivery location.
    Locations {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search, then confirm the suggestion at `index` (1-based).
    Confirm {
        index: usize,
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that a free-text location is serviceable.
    Validate {
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,
    },
    /// Search products, validating `--location` first.
    Products {
        #[arg(long)]
        location: Option<String>,
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// List recently validated locations.
    Cache {
        /// Forget every validated location instead.
        #[arg(long)]
        clear: bool,
    },
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

type FileValidator<P> = LocationValidator<P, FileStore, SystemClock>;

fn validator_for<P: QuickCommercePlatform>(config: &AppConfig, client: P) -> FileValidator<P> {
    let cache = ValidatedLocationCache::new(
        client.platform(),
        FileStore::new(&config.session_path),
        SystemClock,
    );
    LocationValidator::new(client, cache)
}

async fn run_platform<P: QuickCommercePlatform>(
    config: &AppConfig,
    client: P,
    command: PlatformCommands,
    json: bool,
) -> anyhow::Result<bool> {
    let mut validator = validator_for(config, client);
    match command {
        PlatformCommands::Locations { query } => {
            locations::run_locations(validator.platform(), &query.join(" "), json).await
        }
        PlatformCommands::Confirm { index, query } => {
            locations::run_confirm(&mut validator, &query.join(" "), index, json).await
        }
        PlatformCommands::Validate { location } => {
            locations::run_validate(&mut validator, &location.join(" "), json).await
        }
        PlatformCommands::Products { location, term } => {
            products::run_products(&mut validator, location.as_deref(), &term.join(" "), json)
                .await
        }
        PlatformCommands::Cache { clear } => locations::run_cache(&mut validator, clear, json),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = basky_core::load_app_config()?;
    init_tracing(&config)?;

    let ok = match cli.command {
        Some(Commands::Zepto { command }) => {
            let client = ZeptoClient::from_config(&config)
                .map_err(|e| anyhow::anyhow!("failed to build Zepto client: {e}"))?;
            run_platform(&config, client, command, cli.json).await?
        }
        Some(Commands::Blinkit { command }) => {
            let client = BlinkitClient::from_config(&config)
                .map_err(|e| anyhow::anyhow!("failed to build Blinkit client: {e}"))?;
            run_platform(&config, client, command, cli.json).await?
        }
        None => {
            println!("basky: pick a platform, e.g. `basky zepto locations indiranagar`");
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
