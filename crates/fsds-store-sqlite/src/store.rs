//! [`SqliteIndexStore`] — the SQLite implementation of [`IndexStore`].

use std::path::{Path, PathBuf};

use fsds_core::{IndexReport, IndexStore, ProcessingState};
use rusqlite::{Connection, OptionalExtension as _};
use tracing::debug;

use crate::{
  encode::{RawProcessingState, REPORT_COLUMNS, encode_dt, report_from_row},
  schema::{IndexTables, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Index and processing-state tables backed by a single SQLite file.
///
/// Holds only the database path; a connection is opened per call.
#[derive(Debug, Clone)]
pub struct SqliteIndexStore {
  database: PathBuf,
  tables:   IndexTables,
}

impl SqliteIndexStore {
  /// File name of the database inside the configured db directory.
  pub const DB_FILE: &'static str = "secfsdstools.db";

  /// Open (or create) `secfsdstools.db` inside `db_dir` and run schema
  /// initialisation. The directory is created if missing.
  pub fn open(db_dir: impl AsRef<Path>, tables: IndexTables) -> Result<Self> {
    std::fs::create_dir_all(db_dir.as_ref())?;
    Self::open_file(db_dir.as_ref().join(Self::DB_FILE), tables)
  }

  /// Open (or create) the database at exactly `path`.
  pub fn open_file(path: impl Into<PathBuf>, tables: IndexTables) -> Result<Self> {
    let store = Self { database: path.into(), tables };
    store.init_schema()?;
    Ok(store)
  }

  pub fn database(&self) -> &Path { &self.database }

  pub fn tables(&self) -> IndexTables { self.tables }

  fn connection(&self) -> Result<Connection> {
    Ok(Connection::open(&self.database)?)
  }

  fn init_schema(&self) -> Result<()> {
    self.connection()?.execute_batch(SCHEMA)?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The index row of one filing, if it was indexed.
  pub fn find_report(&self, adsh: &str) -> Result<Option<IndexReport>> {
    let sql = format!(
      "SELECT {REPORT_COLUMNS} FROM {} WHERE adsh = ?1",
      self.tables.reports
    );
    debug!("execute {sql}");
    let conn = self.connection()?;
    Ok(
      conn
        .query_row(&sql, rusqlite::params![adsh], report_from_row)
        .optional()?,
    )
  }

  /// All index rows of one filer, newest period first.
  pub fn find_reports_by_cik(&self, cik: i64) -> Result<Vec<IndexReport>> {
    let sql = format!(
      "SELECT {REPORT_COLUMNS} FROM {} WHERE cik = ?1
       ORDER BY period DESC, filed DESC",
      self.tables.reports
    );
    debug!("execute {sql}");
    let conn = self.connection()?;
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
      .query_map(rusqlite::params![cik], report_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  /// The filer's report with the latest period; ties go to the latest filing.
  pub fn find_latest_company_report(&self, cik: i64) -> Result<Option<IndexReport>> {
    let sql = format!(
      "SELECT {REPORT_COLUMNS} FROM {} WHERE cik = ?1
       ORDER BY period DESC, filed DESC LIMIT 1",
      self.tables.reports
    );
    debug!("execute {sql}");
    let conn = self.connection()?;
    Ok(
      conn
        .query_row(&sql, rusqlite::params![cik], report_from_row)
        .optional()?,
    )
  }

  pub fn count_reports(&self) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", self.tables.reports);
    let conn = self.connection()?;
    Ok(conn.query_row(&sql, [], |r| r.get(0))?)
  }
}

// ─── IndexStore impl ─────────────────────────────────────────────────────────

impl IndexStore for SqliteIndexStore {
  type Error = Error;

  fn all_states(&self) -> Result<Vec<ProcessingState>> {
    let sql = format!(
      "SELECT fileName, fullPath, status, entries, processTime FROM {}",
      self.tables.states
    );
    debug!("execute {sql}");
    let conn = self.connection()?;
    let mut stmt = conn.prepare(&sql)?;
    let raws = stmt
      .query_map([], RawProcessingState::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raws.into_iter().map(RawProcessingState::into_state).collect()
  }

  /// Inserts the state, replacing any earlier state of the same unit.
  fn record_state(&self, state: &ProcessingState) -> Result<()> {
    let sql = format!(
      "INSERT INTO {} (fileName, fullPath, status, entries, processTime)
       VALUES (?1, ?2, ?3, ?4, ?5)
       ON CONFLICT(fileName) DO UPDATE SET
         fullPath    = excluded.fullPath,
         status      = excluded.status,
         entries     = excluded.entries,
         processTime = excluded.processTime",
      self.tables.states
    );
    debug!("execute {sql}");
    let conn = self.connection()?;
    conn.execute(
      &sql,
      rusqlite::params![
        state.file_name,
        state.full_path,
        state.status,
        state.entries,
        encode_dt(state.process_time),
      ],
    )?;
    Ok(())
  }

  fn add_index_reports(&self, reports: &[IndexReport]) -> Result<()> {
    let sql = format!(
      "INSERT INTO {} ({REPORT_COLUMNS})
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
      self.tables.reports
    );
    debug!("execute {sql} for {} rows", reports.len());
    let mut conn = self.connection()?;
    let tx = conn.transaction()?;
    {
      let mut stmt = tx.prepare(&sql)?;
      for r in reports {
        stmt.execute(rusqlite::params![
          r.adsh,
          r.cik,
          r.name,
          r.form,
          r.filed,
          r.period,
          r.full_path,
          r.origin_file,
          r.origin_file_type,
          r.url,
        ])?;
      }
    }
    tx.commit()?;
    Ok(())
  }
}
