//! Types persisted by the indexer: one [`IndexReport`] per filing and one
//! [`ProcessingState`] per indexed source unit.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Status stamped on a unit whose submissions were written to the index.
pub const PROCESSED: &str = "processed";

/// Base of the filing URLs built for every index row.
pub const URL_PREFIX: &str = "https://www.sec.gov/Archives/edgar/data/";

// ─── Submission header ───────────────────────────────────────────────────────

/// The column subset of `sub.txt` the indexer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionHeader {
  pub adsh:   String,
  pub cik:    i64,
  pub name:   String,
  pub form:   String,
  pub filed:  Option<i32>,
  pub period: Option<i32>,
}

// ─── Index row ───────────────────────────────────────────────────────────────

/// A submission header stamped with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
  pub adsh:             String,
  pub cik:              i64,
  pub name:             String,
  pub form:             String,
  pub filed:            Option<i32>,
  pub period:           Option<i32>,
  /// Absolute path of the archive or directory the row was read from.
  pub full_path:        String,
  pub origin_file:      String,
  pub origin_file_type: String,
  pub url:              String,
}

impl IndexReport {
  pub fn from_header(
    header:           SubmissionHeader,
    full_path:        &str,
    origin_file:      &str,
    origin_file_type: &str,
  ) -> Self {
    let url = filing_url(header.cik, &header.adsh);
    Self {
      adsh: header.adsh,
      cik: header.cik,
      name: header.name,
      form: header.form,
      filed: header.filed,
      period: header.period,
      full_path: full_path.to_owned(),
      origin_file: origin_file.to_owned(),
      origin_file_type: origin_file_type.to_owned(),
      url,
    }
  }
}

/// `<prefix><cik>/<adsh without dashes>/<adsh>-index.htm`
pub fn filing_url(cik: i64, adsh: &str) -> String {
  format!("{URL_PREFIX}{cik}/{}/{adsh}-index.htm", adsh.replace('-', ""))
}

// ─── Processing state ────────────────────────────────────────────────────────

/// Durable record that a source unit was indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingState {
  pub file_name:    String,
  pub full_path:    String,
  pub status:       String,
  /// Number of index rows written for the unit.
  pub entries:      i64,
  pub process_time: DateTime<FixedOffset>,
}

impl ProcessingState {
  pub fn is_processed(&self) -> bool { self.status == PROCESSED }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_strips_dashes_from_directory_only() {
    assert_eq!(
      filing_url(320193, "0001193125-10-012085"),
      "https://www.sec.gov/Archives/edgar/data/320193/000119312510012085/\
       0001193125-10-012085-index.htm"
    );
  }

  #[test]
  fn from_header_stamps_origin() {
    let header = SubmissionHeader {
      adsh:   "0000002178-09-000021".into(),
      cik:    2178,
      name:   "ADAMS RESOURCES & ENERGY, INC.".into(),
      form:   "10-Q".into(),
      filed:  Some(20090810),
      period: Some(20090630),
    };
    let report =
      IndexReport::from_header(header, "/data/2009q3.zip", "2009q3.zip", "quarter");
    assert_eq!(report.origin_file, "2009q3.zip");
    assert_eq!(report.origin_file_type, "quarter");
    assert_eq!(report.full_path, "/data/2009q3.zip");
    assert!(report.url.ends_with("/2178/000000217809000021/0000002178-09-000021-index.htm"));
  }
}
