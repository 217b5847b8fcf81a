//! Enumeration of source units.
//!
//! A unit is one quarterly data set: a zip archive in the download directory,
//! or a converted parquet directory under `<parquet_dir>/<file_type>/`. Unit
//! names are file (or directory) names, which is also what the processing
//! state is keyed by.

use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use fsds_bag::{columnar::read_parquet, files};
use fsds_core::SubmissionHeader;
use tracing::{debug, warn};

use crate::Result;

pub trait ReportSource {
  /// Names of the units currently present. Order is unspecified.
  fn present_units(&self) -> Result<Vec<String>>;

  /// Submission headers of `unit`, plus the unit's absolute path.
  fn extract_submissions(&self, unit: &str) -> Result<(Vec<SubmissionHeader>, PathBuf)>;

  /// Label stamped into `originFileType` of every indexed report.
  fn file_type(&self) -> &str;
}

/// Lists the entries of `dir` that satisfy `keep`. A missing directory has no
/// entries.
fn list_names(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>> {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(dir = %dir.display(), "source directory does not exist");
      return Ok(Vec::new());
    }
    Err(e) => return Err(e.into()),
  };

  let mut names = Vec::new();
  for entry in entries {
    let path = entry?.path();
    if !keep(&path) {
      continue;
    }
    match path.file_name().and_then(|n| n.to_str()) {
      Some(name) => names.push(name.to_owned()),
      None => warn!(path = %path.display(), "skipping entry with non UTF-8 name"),
    }
  }
  Ok(names)
}

// ─── Zip archives ────────────────────────────────────────────────────────────

/// Zip archives (`*.zip`) directly inside `zip_dir`.
#[derive(Debug, Clone)]
pub struct ZipSource {
  zip_dir:   PathBuf,
  file_type: String,
}

impl ZipSource {
  pub fn new(zip_dir: impl Into<PathBuf>, file_type: impl Into<String>) -> Self {
    Self { zip_dir: zip_dir.into(), file_type: file_type.into() }
  }
}

impl ReportSource for ZipSource {
  fn present_units(&self) -> Result<Vec<String>> {
    list_names(&self.zip_dir, |p| {
      p.is_file() && p.extension().is_some_and(|ext| ext == "zip")
    })
  }

  fn extract_submissions(&self, unit: &str) -> Result<(Vec<SubmissionHeader>, PathBuf)> {
    let full_path = fs::canonicalize(self.zip_dir.join(unit))?;
    let headers = fsds_archive::read_submission_headers(&full_path)?;
    Ok((headers, full_path))
  }

  fn file_type(&self) -> &str { &self.file_type }
}

// ─── Parquet directories ─────────────────────────────────────────────────────

/// Converted data sets: the subdirectories of `<parquet_dir>/<file_type>/`,
/// each holding a saved raw bag.
#[derive(Debug, Clone)]
pub struct ParquetSource {
  parquet_dir: PathBuf,
  file_type:   String,
}

impl ParquetSource {
  pub fn new(parquet_dir: impl Into<PathBuf>, file_type: impl Into<String>) -> Self {
    Self { parquet_dir: parquet_dir.into(), file_type: file_type.into() }
  }

  fn type_dir(&self) -> PathBuf { self.parquet_dir.join(&self.file_type) }
}

impl ReportSource for ParquetSource {
  fn present_units(&self) -> Result<Vec<String>> { list_names(&self.type_dir(), Path::is_dir) }

  fn extract_submissions(&self, unit: &str) -> Result<(Vec<SubmissionHeader>, PathBuf)> {
    let full_path = fs::canonicalize(self.type_dir().join(unit))?;
    let headers = read_parquet::<SubmissionHeader>(&full_path.join(files::SUB))?;
    Ok((headers, full_path))
  }

  fn file_type(&self) -> &str { &self.file_type }
}

#[cfg(test)]
mod tests {
  use fsds_bag::RawDataBag;

  use super::*;
  use crate::test_data;

  fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
  }

  #[test]
  fn zip_source_lists_only_zip_files() {
    let dir = tempfile::tempdir().unwrap();
    test_data::write_archive(&dir.path().join("2009q3.zip"), 2);
    test_data::write_archive(&dir.path().join("2009q2.zip"), 1);
    fs::write(dir.path().join("readme.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested.zip")).unwrap();

    let source = ZipSource::new(dir.path(), "quarter");
    assert_eq!(sorted(source.present_units().unwrap()), ["2009q2.zip", "2009q3.zip"]);
  }

  #[cfg(unix)]
  #[test]
  fn non_utf8_names_are_skipped() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    test_data::write_archive(&dir.path().join("2009q3.zip"), 1);
    let odd = dir.path().join(OsStr::from_bytes(b"2009q\xff.zip"));
    if fs::write(&odd, b"").is_err() {
      return;
    }

    let source = ZipSource::new(dir.path(), "quarter");
    assert_eq!(source.present_units().unwrap(), ["2009q3.zip"]);
  }

  #[test]
  fn missing_directory_has_no_units() {
    let dir = tempfile::tempdir().unwrap();
    let zips = ZipSource::new(dir.path().join("absent"), "quarter");
    let parquet = ParquetSource::new(dir.path().join("absent"), "quarter");
    assert!(zips.present_units().unwrap().is_empty());
    assert!(parquet.present_units().unwrap().is_empty());
  }

  #[test]
  fn zip_source_extracts_headers_with_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    test_data::write_archive(&dir.path().join("2009q3.zip"), 3);

    let source = ZipSource::new(dir.path(), "quarter");
    let (headers, full_path) = source.extract_submissions("2009q3.zip").unwrap();
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[0].name, "COMPANY 0");
    assert_eq!(headers[1].form, "10-K");
    assert!(full_path.is_absolute());
    assert!(full_path.ends_with("2009q3.zip"));
  }

  #[test]
  fn zip_source_missing_unit_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = ZipSource::new(dir.path(), "quarter");
    assert!(source.extract_submissions("2010q1.zip").is_err());
  }

  #[test]
  fn parquet_source_reads_saved_bags() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("2009q3.zip");
    test_data::write_archive(&archive, 4);

    let unit_dir = dir.path().join("parquet").join("quarter").join("2009q3.zip");
    fs::create_dir_all(&unit_dir).unwrap();
    RawDataBag::from_archive(&archive).unwrap().save(&unit_dir).unwrap();
    fs::write(dir.path().join("parquet").join("quarter").join("stray.txt"), "").unwrap();

    let source = ParquetSource::new(dir.path().join("parquet"), "quarter");
    assert_eq!(source.present_units().unwrap(), ["2009q3.zip"]);

    let (headers, full_path) = source.extract_submissions("2009q3.zip").unwrap();
    assert_eq!(headers.len(), 4);
    assert_eq!(headers[3].cik, 1003);
    assert!(full_path.is_absolute());
  }
}
