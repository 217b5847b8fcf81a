//! SQL schema for the index database.
//!
//! Zip archives and converted parquet directories are tracked in separate
//! table pairs so both indexers can share one database file.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS index_reports (
    adsh           TEXT NOT NULL,
    cik            INTEGER NOT NULL,
    name           TEXT NOT NULL,
    form           TEXT NOT NULL,
    filed          INTEGER,          -- YYYYMMDD
    period         INTEGER,          -- YYYYMMDD
    fullPath       TEXT NOT NULL,
    originFile     TEXT NOT NULL,
    originFileType TEXT NOT NULL,
    url            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS index_file_processing_state (
    fileName    TEXT PRIMARY KEY,
    fullPath    TEXT NOT NULL,
    status      TEXT NOT NULL,
    entries     INTEGER NOT NULL,
    processTime TEXT NOT NULL      -- ISO 8601 with offset
);

CREATE TABLE IF NOT EXISTS index_parquet_reports (
    adsh           TEXT NOT NULL,
    cik            INTEGER NOT NULL,
    name           TEXT NOT NULL,
    form           TEXT NOT NULL,
    filed          INTEGER,
    period         INTEGER,
    fullPath       TEXT NOT NULL,
    originFile     TEXT NOT NULL,
    originFileType TEXT NOT NULL,
    url            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS index_parquet_processing_state (
    fileName    TEXT PRIMARY KEY,
    fullPath    TEXT NOT NULL,
    status      TEXT NOT NULL,
    entries     INTEGER NOT NULL,
    processTime TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS index_reports_adsh_idx         ON index_reports(adsh);
CREATE INDEX IF NOT EXISTS index_reports_cik_idx          ON index_reports(cik);
CREATE INDEX IF NOT EXISTS index_parquet_reports_adsh_idx ON index_parquet_reports(adsh);
CREATE INDEX IF NOT EXISTS index_parquet_reports_cik_idx  ON index_parquet_reports(cik);
";

/// The table pair a store instance reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTables {
  pub reports: &'static str,
  pub states:  &'static str,
}

impl IndexTables {
  /// Tables fed from zip archives.
  pub const ZIP: Self = Self {
    reports: "index_reports",
    states:  "index_file_processing_state",
  };

  /// Tables fed from converted parquet directories.
  pub const PARQUET: Self = Self {
    reports: "index_parquet_reports",
    states:  "index_parquet_processing_state",
  };
}
