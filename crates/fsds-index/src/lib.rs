//! Incremental indexing of financial statement data set archives.
//!
//! A [`ReportSource`] enumerates source units (zip archives or converted
//! parquet directories) and extracts their submission headers; the
//! [`Indexer`] writes the headers of every unit not yet processed to an
//! [`IndexStore`](fsds_core::IndexStore) and marks the unit processed.

pub mod convert;
pub mod error;
pub mod indexer;
pub mod source;

pub use convert::convert_archives;
pub use error::{Error, Result};
pub use indexer::{Indexer, IndexingReport};
pub use source::{ParquetSource, ReportSource, ZipSource};

#[cfg(test)]
pub(crate) mod test_data {
  use std::{fmt::Write as _, path::Path};

  use fsds_archive::{NUM_TXT, PRE_TXT, SUB_TXT, write_text_entries};

  /// `sub.txt` with `rows` filings of alternating forms.
  pub(crate) fn sub_txt(rows: usize) -> String {
    let mut out = String::from("adsh\tcik\tname\tsic\tform\tperiod\tfiled\tfy\n");
    for i in 0..rows {
      let form = if i % 2 == 0 { "10-Q" } else { "10-K" };
      writeln!(
        out,
        "{:010}-09-{:06}\t{}\tCOMPANY {i}\t1000\t{form}\t20090630\t2009081{}\t2009",
        1000 + i,
        i,
        1000 + i,
        i % 10,
      )
      .unwrap();
    }
    out
  }

  /// A complete archive with `rows` filings and one fact each.
  pub(crate) fn write_archive(path: &Path, rows: usize) {
    let sub = sub_txt(rows);
    let mut pre = String::from("adsh\treport\tline\tstmt\tinpth\trfile\ttag\tversion\tplabel\tnegating\n");
    let mut num = String::from("adsh\ttag\tversion\tcoreg\tddate\tqtrs\tuom\tvalue\tfootnote\n");
    for i in 0..rows {
      let adsh = format!("{:010}-09-{:06}", 1000 + i, i);
      writeln!(pre, "{adsh}\t2\t1\tBS\t0\tH\tAssets\tus-gaap/2009\tTotal assets\t0").unwrap();
      writeln!(num, "{adsh}\tAssets\tus-gaap/2009\t\t20090630\t0\tUSD\t{i}\t").unwrap();
    }
    write_text_entries(path, &[(SUB_TXT, &sub), (PRE_TXT, &pre), (NUM_TXT, &num)]).unwrap();
  }
}
