//! Shared fixtures: three filings, five presentation rows and eleven facts.
//!
//! Two facts (`Liabilities`, `Goodwill`) have no presentation row and are
//! lost by the join. One fact carries an empty co-registrant.

use fsds_core::record::{NumRecord, PreRecord, SubmissionRecord};

pub(crate) const APPLE: &str = "0000320193-20-000010";
pub(crate) const MICROSOFT: &str = "0000789019-20-000020";
pub(crate) const AMAZON: &str = "0001018724-20-000004";

const VERSION: &str = "us-gaap/2019";

fn submission(adsh: &str, cik: i64, name: &str, form: &str, period: i32, filed: i32) -> SubmissionRecord {
  SubmissionRecord {
    adsh: adsh.into(),
    cik,
    name: name.into(),
    sic: Some(3571),
    countryba: Some("US".into()),
    form: form.into(),
    period: Some(period),
    fye: Some("0930".into()),
    fy: Some(2020),
    fp: Some("Q1".into()),
    filed: Some(filed),
    prevrpt: Some(0),
    instance: None,
  }
}

pub(crate) fn sub() -> Vec<SubmissionRecord> {
  vec![
    submission(APPLE, 320193, "APPLE INC", "10-Q", 20200229, 20200301),
    submission(MICROSOFT, 789019, "MICROSOFT CORP", "10-Q", 20200331, 20200501),
    submission(AMAZON, 1018724, "AMAZON COM INC", "10-K", 20191231, 20200131),
  ]
}

fn presentation(adsh: &str, report: i32, line: i32, stmt: &str, tag: &str) -> PreRecord {
  PreRecord {
    adsh: adsh.into(),
    report,
    line,
    stmt: stmt.into(),
    inpth: 0,
    rfile: "H".into(),
    tag: tag.into(),
    version: VERSION.into(),
    plabel: format!("{tag} label"),
    negating: 0,
  }
}

pub(crate) fn pre() -> Vec<PreRecord> {
  vec![
    presentation(APPLE, 2, 1, "BS", "Assets"),
    presentation(APPLE, 4, 1, "IS", "Revenues"),
    presentation(MICROSOFT, 2, 1, "BS", "Assets"),
    presentation(MICROSOFT, 4, 2, "IS", "NetIncomeLoss"),
    presentation(AMAZON, 2, 1, "BS", "Assets"),
  ]
}

pub(crate) fn fact(
  adsh:  &str,
  tag:   &str,
  ddate: i32,
  qtrs:  i32,
  coreg: Option<&str>,
  value: f64,
) -> NumRecord {
  NumRecord {
    adsh: adsh.into(),
    tag: tag.into(),
    version: VERSION.into(),
    ddate,
    qtrs,
    uom: "USD".into(),
    coreg: coreg.map(str::to_owned),
    value: Some(value),
    footnote: None,
  }
}

pub(crate) fn num() -> Vec<NumRecord> {
  vec![
    fact(APPLE, "Assets", 20200229, 0, None, 100.0),
    fact(APPLE, "Assets", 20190228, 0, None, 90.0),
    fact(APPLE, "Revenues", 20200229, 1, Some(""), 50.0),
    fact(APPLE, "Revenues", 20200229, 1, Some("AppleSub"), 10.0),
    fact(APPLE, "Liabilities", 20200229, 0, None, 40.0),
    fact(MICROSOFT, "Assets", 20200331, 0, None, 200.0),
    fact(MICROSOFT, "NetIncomeLoss", 20200331, 1, None, 20.0),
    fact(MICROSOFT, "Assets", 20181231, 0, None, 150.0),
    fact(AMAZON, "Assets", 20191231, 0, None, 300.0),
    fact(AMAZON, "Assets", 20181231, 0, None, 250.0),
    fact(AMAZON, "Goodwill", 20191231, 0, None, 5.0),
  ]
}
