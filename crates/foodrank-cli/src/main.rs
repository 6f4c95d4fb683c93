//! `foodrank` — rank foods by compound concentration.
//!
//! # Usage
//!
//! ```text
//! foodrank build [--force]
//! foodrank query --compounds "Iron, Vitamin C" --top-n 3
//! foodrank compounds
//! ```
//!
//! Without a subcommand, `foodrank` prompts for compounds interactively.
//! Paths and the default top-N come from `foodrank.toml` and `FOOD_*`
//! environment variables; see [`settings::Settings`].

mod prompt;
mod settings;

use std::{collections::BTreeSet, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foodrank_core::{
  pipeline::{load_or_build, rebuild, run_query},
  query::parse_compound_list,
  store::RankedStore,
};
use foodrank_store_csv::{CsvRankedStore, CsvReportSink, CsvTables};
use settings::Settings;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "foodrank", version, about = "Rank foods by compound concentration")]
struct Cli {
  /// Path to a TOML settings file; ignored if it does not exist.
  #[arg(short, long, value_name = "FILE", default_value = "foodrank.toml", global = true)]
  config: PathBuf,

  /// Directory with foods.csv, compounds.csv and contents.csv.
  #[arg(long, value_name = "DIR", global = true)]
  data_raw_path: Option<PathBuf>,

  /// Directory holding the ranked store.
  #[arg(long, value_name = "DIR", global = true)]
  database_path: Option<PathBuf>,

  /// Directory receiving query reports.
  #[arg(long, value_name = "DIR", global = true)]
  results_path: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Build the ranked store from the raw tables if it does not exist.
  Build {
    /// Rebuild even if the store already exists.
    #[arg(long)]
    force: bool,
  },
  /// Report the top foods for one or more compounds.
  #[command(alias = "q")]
  Query {
    /// Comma-separated compound names; prompts when omitted.
    #[arg(long)]
    compounds: Option<String>,

    /// Number of ranks kept per compound (default from settings).
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Also print the result as JSON on stdout.
    #[arg(long)]
    json: bool,
  },
  /// List the compounds available in the ranked store.
  Compounds,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr; stdout carries results.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
  if let Some(path) = cli.data_raw_path {
    settings.data_raw_path = path;
  }
  if let Some(path) = cli.database_path {
    settings.database_path = path;
  }
  if let Some(path) = cli.results_path {
    settings.results_path = path;
  }

  let command = cli.command.unwrap_or(Command::Query {
    compounds: None,
    top_n:     None,
    json:      false,
  });

  match command {
    Command::Build { force } => build(&settings, force),
    Command::Query { compounds, top_n, json } => {
      query(&settings, compounds, top_n.unwrap_or(settings.top_n_foods), json)
    }
    Command::Compounds => list_compounds(&settings),
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn build(settings: &Settings, force: bool) -> Result<()> {
  let tables = CsvTables::new(&settings.data_raw_path);
  let store = CsvRankedStore::new(&settings.database_path);

  if store.exists() && !force {
    info!(path = %store.path().display(), "ranked store already exists; use --force to rebuild");
    return Ok(());
  }

  rebuild(&tables, &store).context("failed to build ranked store")?;
  println!("{}", store.path().display());
  Ok(())
}

fn query(
  settings: &Settings,
  compounds: Option<String>,
  top_n: usize,
  json: bool,
) -> Result<()> {
  let requested: BTreeSet<String> = match compounds {
    Some(raw) => parse_compound_list(&raw)?,
    None => {
      let stdin = io::stdin();
      let mut stdout = io::stdout();
      match prompt::read_compounds(&mut stdin.lock(), &mut stdout)? {
        Some(names) => names,
        None => {
          eprintln!("Bye bye");
          return Ok(());
        }
      }
    }
  };

  let outcome = run_query(
    &CsvTables::new(&settings.data_raw_path),
    &CsvRankedStore::new(&settings.database_path),
    &CsvReportSink::new(&settings.results_path),
    &requested,
    top_n,
  )
  .context("query failed")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcome.result)?);
  }
  println!("{}", outcome.output.display());
  Ok(())
}

fn list_compounds(settings: &Settings) -> Result<()> {
  let table = load_or_build(
    &CsvTables::new(&settings.data_raw_path),
    &CsvRankedStore::new(&settings.database_path),
  )
  .context("failed to load ranked store")?;

  for name in table.compound_names() {
    println!("{name}");
  }
  Ok(())
}
