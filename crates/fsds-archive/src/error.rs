//! Error types for the fsds-archive reader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("zip error: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("{entry} not found in {archive}")]
  MissingEntry { archive: String, entry: String },

  #[error("malformed row in {entry}: {source}")]
  Row {
    entry:  String,
    #[source]
    source: csv::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
