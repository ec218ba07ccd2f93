//! `fuelmon` — command-line front end for the fuel monitor store.
//!
//! # Usage
//!
//! ```text
//! fuelmon vehicle add --make 1 --model Corolla --capacity 50 \
//!   --registration AA-11-AA --year 2015 --odometer 1000
//! fuelmon fueling add --vehicle 1 --odometer 1050 --station Shell \
//!   --quantity 35 --cost 55 --city
//! fuelmon --json fueling list 1
//! ```
//!
//! Settings come from `fuelmon.toml` (or `--config`), overridden by
//! `FUELMON_*` environment variables. Logs go to stderr; `RUST_LOG` controls
//! verbosity.

mod commands;
mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use fuelmon_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{commands::Command, output::Output, settings::Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Track vehicles and their fuelings")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "fuelmon.toml")]
  config: PathBuf,

  /// Database file; overrides `store_path` from the configuration.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store_path = cli
    .store
    .map(|p| settings::expand_tilde(&p))
    .unwrap_or_else(|| settings.resolved_store_path());
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  // A store that cannot be opened is fatal.
  let store = SqliteStore::open(&store_path, &settings.seed())
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let result = commands::run(&store, cli.command, &Output::new(cli.json));
  store.close().context("failed to close store")?;
  result
}
