//! Reader for quarterly financial statement data set archives.
//!
//! An archive is a zip file holding the tab-delimited tables `sub.txt`,
//! `pre.txt` and `num.txt` (plus a readme that is ignored). Pure synchronous;
//! no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let tables = fsds_archive::read_archive("dld/2009q3.zip").unwrap();
//! println!("{} submissions, {} facts", tables.sub.len(), tables.num.len());
//! ```

pub mod error;
mod read;
mod write;

use std::path::Path;

pub use error::{Error, Result};
use fsds_core::{
  SubmissionHeader,
  record::{NumRecord, PreRecord, SubmissionRecord},
};
pub use read::{list_entries, read_table};
pub use write::write_text_entries;

/// Entry names inside an archive.
pub const SUB_TXT: &str = "sub.txt";
pub const PRE_TXT: &str = "pre.txt";
pub const NUM_TXT: &str = "num.txt";

// ─── Public types
// ─────────────────────────────────────────────────────────────

/// The three tables of one archive, in file order.
#[derive(Debug, Clone, Default)]
pub struct ArchiveTables {
  pub sub: Vec<SubmissionRecord>,
  pub pre: Vec<PreRecord>,
  pub num: Vec<NumRecord>,
}

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Read the indexer's column subset of `sub.txt`.
pub fn read_submission_headers(archive: impl AsRef<Path>) -> Result<Vec<SubmissionHeader>> {
  read_table(archive, SUB_TXT)
}

/// Read all three tables of `archive`.
pub fn read_archive(archive: impl AsRef<Path>) -> Result<ArchiveTables> {
  let archive = archive.as_ref();
  Ok(ArchiveTables {
    sub: read_table(archive, SUB_TXT)?,
    pre: read_table(archive, PRE_TXT)?,
    num: read_table(archive, NUM_TXT)?,
  })
}

#[cfg(test)]
pub(crate) mod test_data {
  pub(crate) const SUB: &str = "\
adsh\tcik\tname\tsic\tcountryba\tstprba\tform\tperiod\tfye\tfy\tfp\tfiled\tprevrpt\tinstance
0000002178-09-000021\t2178\tADAMS RESOURCES & ENERGY, INC.\t5172\tUS\tTX\t10-Q\t20090630\t1231\t2009\tQ2\t20090810\t0\tae-20090630.xml
0000002488-09-000040\t2488\tADVANCED MICRO DEVICES INC\t3674\tUS\tCA\t10-Q\t\t1231\t2009\tQ2\t20090805\t0\tamd-20090627.xml
";

  pub(crate) const PRE: &str = "\
adsh\treport\tline\tstmt\tinpth\trfile\ttag\tversion\tplabel\tnegating
0000002178-09-000021\t2\t3\tBS\t0\tH\tCash\tus-gaap/2009\tCash and \"cash\" equivalents\t0
0000002178-09-000021\t4\t7\tIS\t0\tH\tRevenues\tus-gaap/2009\tRevenues\t0
";

  pub(crate) const NUM: &str = "\
adsh\ttag\tversion\tcoreg\tddate\tqtrs\tuom\tvalue\tfootnote
0000002178-09-000021\tCash\tus-gaap/2009\t\t20090630\t0\tUSD\t18470000.0000\t
0000002178-09-000021\tRevenues\tus-gaap/2009\tSubsidiaryCo\t20090630\t1\tUSD\t485744000.0000\t
0000002178-09-000021\tRevenues\tus-gaap/2009\t\t20090630\t1\tUSD\t\tNot reported
";
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::test_data::{NUM, PRE, SUB};

  fn archive(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("2009q3.zip");
    write_text_entries(
      &path,
      &[(SUB_TXT, SUB), (PRE_TXT, PRE), (NUM_TXT, NUM), ("readme.htm", "<html/>")],
    )
    .unwrap();
    path
  }

  #[test]
  fn reads_submission_header_subset() {
    let dir = TempDir::new().unwrap();
    let headers = read_submission_headers(archive(&dir)).unwrap();

    assert_eq!(headers.len(), 2);
    assert_eq!(headers[0].adsh, "0000002178-09-000021");
    assert_eq!(headers[0].cik, 2178);
    assert_eq!(headers[0].name, "ADAMS RESOURCES & ENERGY, INC.");
    assert_eq!(headers[0].form, "10-Q");
    assert_eq!(headers[0].filed, Some(20090810));
    assert_eq!(headers[0].period, Some(20090630));
  }

  #[test]
  fn empty_date_is_none() {
    let dir = TempDir::new().unwrap();
    let headers = read_submission_headers(archive(&dir)).unwrap();
    assert_eq!(headers[1].period, None);
  }

  #[test]
  fn reads_all_three_tables() {
    let dir = TempDir::new().unwrap();
    let tables = read_archive(archive(&dir)).unwrap();

    assert_eq!(tables.sub.len(), 2);
    assert_eq!(tables.sub[0].sic, Some(5172));
    assert_eq!(tables.sub[0].fp.as_deref(), Some("Q2"));

    assert_eq!(tables.pre.len(), 2);
    assert_eq!(tables.pre[0].stmt, "BS");
    assert_eq!(tables.pre[0].plabel, "Cash and \"cash\" equivalents");

    assert_eq!(tables.num.len(), 3);
    assert_eq!(tables.num[0].coreg, None);
    assert_eq!(tables.num[1].coreg.as_deref(), Some("SubsidiaryCo"));
    assert_eq!(tables.num[0].value, Some(18_470_000.0));
    assert_eq!(tables.num[2].value, None);
    assert_eq!(tables.num[2].footnote.as_deref(), Some("Not reported"));
  }

  #[test]
  fn lists_entries() {
    let dir = TempDir::new().unwrap();
    let mut entries = list_entries(archive(&dir)).unwrap();
    entries.sort();
    assert_eq!(entries, vec!["num.txt", "pre.txt", "readme.htm", "sub.txt"]);
  }

  #[test]
  fn missing_entry_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.zip");
    write_text_entries(&path, &[(PRE_TXT, PRE)]).unwrap();

    let err = read_submission_headers(&path).unwrap_err();
    assert!(matches!(err, Error::MissingEntry { ref entry, .. } if entry == SUB_TXT));
  }

  #[test]
  fn missing_archive_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_archive(dir.path().join("nope.zip")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
  }

  #[test]
  fn malformed_integer_is_row_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.zip");
    let sub = "adsh\tcik\tname\tform\tfiled\tperiod\nX\tnot-a-number\tN\t10-K\t\t\n";
    write_text_entries(&path, &[(SUB_TXT, sub)]).unwrap();

    assert!(matches!(
      read_submission_headers(&path).unwrap_err(),
      Error::Row { .. }
    ));
  }
}
