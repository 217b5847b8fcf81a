//! Conversions between domain types and the plain values stored in SQLite.
//!
//! Process timestamps are stored as RFC 3339 strings that keep their offset.

use chrono::{DateTime, FixedOffset};
use fsds_core::{IndexReport, ProcessingState};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<FixedOffset>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<FixedOffset>> {
  DateTime::parse_from_rfc3339(s).map_err(|e| Error::DateParse(e.to_string()))
}

/// Column order shared by every `SELECT` against a reports table.
pub const REPORT_COLUMNS: &str =
  "adsh, cik, name, form, filed, period, fullPath, originFile, originFileType, url";

pub fn report_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<IndexReport> {
  Ok(IndexReport {
    adsh:             row.get(0)?,
    cik:              row.get(1)?,
    name:             row.get(2)?,
    form:             row.get(3)?,
    filed:            row.get(4)?,
    period:           row.get(5)?,
    full_path:        row.get(6)?,
    origin_file:      row.get(7)?,
    origin_file_type: row.get(8)?,
    url:              row.get(9)?,
  })
}

/// Raw values read directly from a processing-state row.
pub struct RawProcessingState {
  pub file_name:    String,
  pub full_path:    String,
  pub status:       String,
  pub entries:      i64,
  pub process_time: String,
}

impl RawProcessingState {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      file_name:    row.get(0)?,
      full_path:    row.get(1)?,
      status:       row.get(2)?,
      entries:      row.get(3)?,
      process_time: row.get(4)?,
    })
  }

  pub fn into_state(self) -> Result<ProcessingState> {
    Ok(ProcessingState {
      file_name:    self.file_name,
      full_path:    self.full_path,
      status:       self.status,
      entries:      self.entries,
      process_time: decode_dt(&self.process_time)?,
    })
  }
}
