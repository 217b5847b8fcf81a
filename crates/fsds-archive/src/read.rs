//! Tab-delimited table reader over zip entries.
//!
//! The data set files carry a header line, use `\t` as delimiter and are not
//! quoted: a `"` inside a label is data. Empty fields deserialise to `None`
//! for `Option` columns; columns not present in the target struct are
//! skipped.

use std::{fs::File, path::Path};

use serde::de::DeserializeOwned;
use tracing::debug;
use zip::{ZipArchive, result::ZipError};

use crate::error::{Error, Result};

fn open(archive: &Path) -> Result<ZipArchive<File>> {
  let file = File::open(archive)?;
  Ok(ZipArchive::new(file)?)
}

/// Deserialise every row of `entry` inside `archive` into `T`.
pub fn read_table<T: DeserializeOwned>(
  archive: impl AsRef<Path>,
  entry:   &str,
) -> Result<Vec<T>> {
  let archive = archive.as_ref();
  let mut zip = open(archive)?;

  let file = zip.by_name(entry).map_err(|e| match e {
    ZipError::FileNotFound => Error::MissingEntry {
      archive: archive.display().to_string(),
      entry:   entry.to_owned(),
    },
    other => Error::Zip(other),
  })?;

  let mut reader = csv::ReaderBuilder::new()
    .delimiter(b'\t')
    .quoting(false)
    .from_reader(file);

  let rows = reader
    .deserialize()
    .collect::<Result<Vec<T>, csv::Error>>()
    .map_err(|source| Error::Row { entry: entry.to_owned(), source })?;

  debug!("read {} rows from {entry} in {}", rows.len(), archive.display());
  Ok(rows)
}

/// Names of all entries in `archive`.
pub fn list_entries(archive: impl AsRef<Path>) -> Result<Vec<String>> {
  let zip = open(archive.as_ref())?;
  Ok(zip.file_names().map(str::to_owned).collect())
}
