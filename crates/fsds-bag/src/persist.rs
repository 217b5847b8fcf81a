//! On-disk layout of saved bags.
//!
//! A bag is a directory holding one parquet file per table. File names are
//! fixed and tied to the logical table.

use std::path::Path;

use crate::{Error, Result};

pub mod files {
  pub const SUB: &str = "sub.txt.parquet";
  pub const PRE: &str = "pre.txt.parquet";
  pub const NUM: &str = "num.txt.parquet";
  pub const PRE_NUM: &str = "pre_num.txt.parquet";
}

/// `target` must be an existing, empty directory.
///
/// Only guards the start of a save: a failure while writing the files leaves
/// whatever was written so far.
pub(crate) fn ensure_empty_dir(target: &Path) -> Result<()> {
  if !target.is_dir() {
    return Err(Error::TargetMissing(target.to_path_buf()));
  }
  if std::fs::read_dir(target)?.next().is_some() {
    return Err(Error::TargetNotEmpty(target.to_path_buf()));
  }
  Ok(())
}
