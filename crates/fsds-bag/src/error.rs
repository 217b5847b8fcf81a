//! Error type for `fsds-bag`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("arrow error: {0}")]
  Arrow(#[from] arrow::error::ArrowError),

  #[error("parquet error: {0}")]
  Parquet(#[from] parquet::errors::ParquetError),

  #[error("archive error: {0}")]
  Archive(#[from] fsds_archive::Error),

  /// `save` was pointed at a directory that does not exist.
  #[error("the path {0} does not exist")]
  TargetMissing(PathBuf),

  /// `save` never writes into a directory that already has content.
  #[error("the target path {0} is not empty")]
  TargetNotEmpty(PathBuf),

  #[error("column {0:?} is missing")]
  MissingColumn(String),

  #[error("column {0:?} has an unexpected type")]
  ColumnType(String),

  #[error("column {0:?} contains nulls")]
  NullValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
