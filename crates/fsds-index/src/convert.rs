//! Conversion of zip archives into parquet bag directories.
//!
//! Each archive `<zip_dir>/<name>.zip` becomes the raw bag directory
//! `<parquet_dir>/<file_type>/<name>.zip/`, which is what [`ParquetSource`]
//! later enumerates.
//!
//! [`ParquetSource`]: crate::ParquetSource

use std::{fs, path::Path};

use fsds_bag::RawDataBag;
use tracing::{info, warn};

use crate::{Result, ReportSource, ZipSource};

/// Convert every archive in `zip_dir` that has no directory under
/// `<parquet_dir>/<file_type>/` yet. Returns the converted unit names, sorted.
///
/// A failed conversion removes the partially written directory before the
/// error is returned, so the archive is retried on the next call.
pub fn convert_archives(
  zip_dir: impl AsRef<Path>,
  parquet_dir: impl AsRef<Path>,
  file_type: &str,
) -> Result<Vec<String>> {
  let zip_dir = zip_dir.as_ref();
  let type_dir = parquet_dir.as_ref().join(file_type);

  let mut units = ZipSource::new(zip_dir, file_type).present_units()?;
  units.retain(|u| !type_dir.join(u).exists());
  units.sort();

  for unit in &units {
    let target = type_dir.join(unit);
    info!(unit = unit.as_str(), target = %target.display(), "converting");
    fs::create_dir_all(&target)?;

    let written = RawDataBag::from_archive(zip_dir.join(unit)).and_then(|bag| bag.save(&target));
    if let Err(e) = written {
      if let Err(cleanup) = fs::remove_dir_all(&target) {
        warn!(target = %target.display(), error = %cleanup, "could not remove partial conversion");
      }
      return Err(e.into());
    }
  }
  Ok(units)
}

#[cfg(test)]
mod tests {
  use fsds_bag::files;

  use super::*;
  use crate::{Error, test_data};

  #[test]
  fn converts_each_archive_once() {
    let root = tempfile::tempdir().unwrap();
    let zips = root.path().join("dld");
    let parquet = root.path().join("parquet");
    fs::create_dir_all(&zips).unwrap();
    test_data::write_archive(&zips.join("2009q3.zip"), 3);
    test_data::write_archive(&zips.join("2009q2.zip"), 2);

    let converted = convert_archives(&zips, &parquet, "quarter").unwrap();
    assert_eq!(converted, ["2009q2.zip", "2009q3.zip"]);

    let unit = parquet.join("quarter").join("2009q3.zip");
    for file in [files::SUB, files::PRE, files::NUM] {
      assert!(unit.join(file).is_file(), "{file} missing");
    }
    let bag = RawDataBag::load(&unit).unwrap();
    assert_eq!(bag.sub().len(), 3);
    assert_eq!(bag.num().len(), 3);

    assert!(convert_archives(&zips, &parquet, "quarter").unwrap().is_empty());
  }

  #[test]
  fn broken_archive_leaves_no_directory() {
    let root = tempfile::tempdir().unwrap();
    let zips = root.path().join("dld");
    let parquet = root.path().join("parquet");
    fs::create_dir_all(&zips).unwrap();
    fs::write(zips.join("2009q4.zip"), b"not a zip").unwrap();

    let err = convert_archives(&zips, &parquet, "quarter").unwrap_err();
    assert!(matches!(err, Error::Bag(_)));
    assert!(!parquet.join("quarter").join("2009q4.zip").exists());
  }
}
