//! Incremental indexer.
//!
//! Each run indexes exactly the units that are present in the source but have
//! no processing state yet. A unit's index rows are written before its state
//! is recorded, so a unit is never marked processed without its rows; a
//! failure in between leaves it unmarked and the next run indexes it again.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Local};
use fsds_core::{IndexReport, IndexStore, ProcessingState, index::PROCESSED};
use tracing::{debug, info};

use crate::{Error, Result, source::ReportSource};

/// Outcome of one [`Indexer::process`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexingReport {
  /// Units indexed by this run, in processing order.
  pub units: Vec<String>,
  /// Index rows written across all units.
  pub rows:  usize,
}

pub struct Indexer<S, St> {
  source:       S,
  store:        St,
  process_time: DateTime<FixedOffset>,
}

impl<S: ReportSource, St: IndexStore> Indexer<S, St> {
  /// Captures the current local time; every state recorded by this indexer
  /// carries it.
  pub fn new(source: S, store: St) -> Self {
    Self::with_process_time(source, store, Local::now().fixed_offset())
  }

  pub fn with_process_time(source: S, store: St, process_time: DateTime<FixedOffset>) -> Self {
    Self { source, store, process_time }
  }

  pub fn process_time(&self) -> DateTime<FixedOffset> { self.process_time }

  pub fn store(&self) -> &St { &self.store }

  /// Present units without a `processed` state, sorted by name.
  pub fn unindexed_units(&self) -> Result<Vec<String>> {
    let known: HashSet<String> = self
      .store
      .all_states()
      .map_err(Error::store)?
      .into_iter()
      .filter(ProcessingState::is_processed)
      .map(|s| s.file_name)
      .collect();

    let mut units: Vec<String> = self
      .source
      .present_units()?
      .into_iter()
      .filter(|u| !known.contains(u))
      .collect();
    units.sort();
    Ok(units)
  }

  /// Index every unindexed unit. Stops at the first failing unit; units
  /// finished before it stay recorded.
  pub fn process(&self) -> Result<IndexingReport> {
    let units = self.unindexed_units()?;
    debug!(count = units.len(), "units to index");

    let mut report = IndexingReport::default();
    for unit in units {
      report.rows += self.index_unit(&unit)?;
      report.units.push(unit);
    }
    Ok(report)
  }

  fn index_unit(&self, unit: &str) -> Result<usize> {
    info!(unit, "indexing");
    let (headers, full_path) = self.source.extract_submissions(unit)?;
    let full_path = full_path.to_string_lossy().into_owned();
    let file_type = self.source.file_type();

    let reports: Vec<IndexReport> = headers
      .into_iter()
      .map(|h| IndexReport::from_header(h, &full_path, unit, file_type))
      .collect();
    self.store.add_index_reports(&reports).map_err(Error::store)?;

    let state = ProcessingState {
      file_name:    unit.to_owned(),
      full_path,
      status:       PROCESSED.to_owned(),
      entries:      reports.len() as i64,
      process_time: self.process_time,
    };
    self.store.record_state(&state).map_err(Error::store)?;

    info!(unit, rows = reports.len(), "indexed");
    Ok(reports.len())
  }
}
