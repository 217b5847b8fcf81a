//! Row types of the three tables shipped in every data set archive.
//!
//! Field names follow the column headers of `sub.txt`, `pre.txt` and
//! `num.txt` so the same structs deserialise straight from the tab-delimited
//! source files. Dates are integer coded as `YYYYMMDD`.

use serde::{Deserialize, Serialize};

// ─── sub.txt ─────────────────────────────────────────────────────────────────

/// One filing header. `adsh` is unique within a submission table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
  pub adsh:      String,
  pub cik:       i64,
  pub name:      String,
  pub sic:       Option<i32>,
  pub countryba: Option<String>,
  pub form:      String,
  /// Balance sheet date, rounded to the nearest month end.
  pub period:    Option<i32>,
  pub fye:       Option<String>,
  pub fy:        Option<i32>,
  pub fp:        Option<String>,
  pub filed:     Option<i32>,
  pub prevrpt:   Option<i32>,
  pub instance:  Option<String>,
}

// ─── pre.txt ─────────────────────────────────────────────────────────────────

/// One line of a rendered statement, pointing at facts via `tag`/`version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreRecord {
  pub adsh:     String,
  pub report:   i32,
  pub line:     i32,
  /// Statement code: `BS`, `IS`, `CF`, `EQ`, `CI`, `UN` or `CP`.
  pub stmt:     String,
  pub inpth:    i32,
  pub rfile:    String,
  pub tag:      String,
  pub version:  String,
  pub plabel:   String,
  pub negating: i32,
}

// ─── num.txt ─────────────────────────────────────────────────────────────────

/// One reported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumRecord {
  pub adsh:     String,
  pub tag:      String,
  pub version:  String,
  pub ddate:    i32,
  pub qtrs:     i32,
  pub uom:      String,
  /// `None` when the value belongs to the primary filer.
  pub coreg:    Option<String>,
  pub value:    Option<f64>,
  pub footnote: Option<String>,
}

impl NumRecord {
  /// The key a fact shares with its presentation rows.
  pub fn join_key(&self) -> (&str, &str, &str) {
    (&self.adsh, &self.tag, &self.version)
  }
}

impl PreRecord {
  pub fn join_key(&self) -> (&str, &str, &str) {
    (&self.adsh, &self.tag, &self.version)
  }
}

// ─── Joined ──────────────────────────────────────────────────────────────────

/// A numeric fact together with the presentation row it is rendered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreNumRecord {
  pub adsh:     String,
  pub tag:      String,
  pub version:  String,
  pub ddate:    i32,
  pub qtrs:     i32,
  pub uom:      String,
  pub coreg:    Option<String>,
  pub value:    Option<f64>,
  pub footnote: Option<String>,
  pub report:   i32,
  pub line:     i32,
  pub stmt:     String,
  pub inpth:    i32,
  pub rfile:    String,
  pub plabel:   String,
  pub negating: i32,
}

impl PreNumRecord {
  pub fn from_parts(num: &NumRecord, pre: &PreRecord) -> Self {
    Self {
      adsh:     num.adsh.clone(),
      tag:      num.tag.clone(),
      version:  num.version.clone(),
      ddate:    num.ddate,
      qtrs:     num.qtrs,
      uom:      num.uom.clone(),
      coreg:    num.coreg.clone(),
      value:    num.value,
      footnote: num.footnote.clone(),
      report:   pre.report,
      line:     pre.line,
      stmt:     pre.stmt.clone(),
      inpth:    pre.inpth,
      rfile:    pre.rfile.clone(),
      plabel:   pre.plabel.clone(),
      negating: pre.negating,
    }
  }
}
