//! `fsds` — index financial statement data set archives and work with the
//! bags built from them.
//!
//! # Usage
//!
//! ```text
//! fsds index                         # index new zip archives
//! fsds convert                       # zip archives -> parquet directories
//! fsds index --source parquet        # index new parquet directories
//! fsds stats parquet/quarter/2009q3.zip
//! fsds join parquet/quarter/2009q3.zip joined/2009q3
//! fsds company 320193
//! ```

mod settings;

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use fsds_bag::RawDataBag;
use fsds_index::{Indexer, ParquetSource, ReportSource, ZipSource};
use fsds_store_sqlite::{IndexTables, SqliteIndexStore};
use serde::Serialize;
use settings::FsdsConfig;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fsds", version, about = "Financial statement data set indexer")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "fsds.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
  Zip,
  Parquet,
}

impl Source {
  fn tables(self) -> IndexTables {
    match self {
      Source::Zip => IndexTables::ZIP,
      Source::Parquet => IndexTables::PARQUET,
    }
  }
}

#[derive(Subcommand)]
enum Command {
  /// Index every source unit not processed yet.
  Index {
    #[arg(long, value_enum, default_value_t = Source::Zip)]
    source: Source,
  },
  /// Convert new zip archives into parquet directories.
  Convert,
  /// Print the statistics of a saved raw bag.
  Stats { bag_dir: PathBuf },
  /// Join a saved raw bag and save the result into an empty directory.
  Join {
    raw_bag_dir: PathBuf,
    target_dir:  PathBuf,
  },
  /// Print the index row of one filing.
  Report {
    adsh:   String,
    #[arg(long, value_enum, default_value_t = Source::Zip)]
    source: Source,
  },
  /// Print all index rows of one filer, latest period first.
  Company {
    cik:    i64,
    #[arg(long, value_enum, default_value_t = Source::Zip)]
    source: Source,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = FsdsConfig::load(&cli.config)?;

  match cli.command {
    Command::Index { source: Source::Zip } => {
      index(ZipSource::new(&cfg.download_dir, &cfg.file_type), &cfg, Source::Zip)
    }
    Command::Index { source: Source::Parquet } => index(
      ParquetSource::new(&cfg.parquet_dir, &cfg.file_type),
      &cfg,
      Source::Parquet,
    ),
    Command::Convert => {
      let converted =
        fsds_index::convert_archives(&cfg.download_dir, &cfg.parquet_dir, &cfg.file_type)
          .context("conversion failed")?;
      info!(count = converted.len(), "converted archives");
      Ok(())
    }
    Command::Stats { bag_dir } => {
      let bag = RawDataBag::load(&bag_dir)
        .with_context(|| format!("failed to load bag from {}", bag_dir.display()))?;
      print_json(&bag.statistics())
    }
    Command::Join { raw_bag_dir, target_dir } => {
      let bag = RawDataBag::load(&raw_bag_dir)
        .with_context(|| format!("failed to load bag from {}", raw_bag_dir.display()))?;
      fs::create_dir_all(&target_dir)?;
      let joined = bag.get_joined_bag();
      joined
        .save(&target_dir)
        .with_context(|| format!("failed to save joined bag to {}", target_dir.display()))?;
      info!(rows = joined.pre_num().len(), "joined bag saved");
      Ok(())
    }
    Command::Report { adsh, source } => print_json(&open_store(&cfg, source)?.find_report(&adsh)?),
    Command::Company { cik, source } => {
      print_json(&open_store(&cfg, source)?.find_reports_by_cik(cik)?)
    }
  }
}

fn open_store(cfg: &FsdsConfig, source: Source) -> anyhow::Result<SqliteIndexStore> {
  SqliteIndexStore::open(&cfg.db_dir, source.tables())
    .with_context(|| format!("failed to open index database in {}", cfg.db_dir.display()))
}

fn index<S: ReportSource>(source: S, cfg: &FsdsConfig, kind: Source) -> anyhow::Result<()> {
  let indexer = Indexer::new(source, open_store(cfg, kind)?);
  let report = indexer.process().context("indexing failed")?;
  info!(units = report.units.len(), rows = report.rows, "indexing finished");
  Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
