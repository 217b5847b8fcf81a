//! [`JoinedDataBag`] — submissions plus facts already joined to their
//! presentation rows.

use std::path::Path;

use fsds_core::record::{PreNumRecord, SubmissionRecord};

use crate::{
  Result,
  columnar::{read_parquet, write_parquet},
  filter::Filter,
  persist::{ensure_empty_dir, files},
};

/// A read-oriented view derived from a [`RawDataBag`](crate::RawDataBag) or
/// loaded from disk. Carries no derived lookups.
#[derive(Debug, Clone, Default)]
pub struct JoinedDataBag {
  sub:     Vec<SubmissionRecord>,
  pre_num: Vec<PreNumRecord>,
}

impl JoinedDataBag {
  pub fn new(sub: Vec<SubmissionRecord>, pre_num: Vec<PreNumRecord>) -> Self {
    Self { sub, pre_num }
  }

  pub fn sub(&self) -> &[SubmissionRecord] { &self.sub }

  pub fn pre_num(&self) -> &[PreNumRecord] { &self.pre_num }

  pub fn into_parts(self) -> (Vec<SubmissionRecord>, Vec<PreNumRecord>) {
    (self.sub, self.pre_num)
  }

  pub fn filter<F: Filter<Self> + ?Sized>(&self, filter: &F) -> Self { filter.filter(self) }

  /// Append the tables of all `bags` in order, without deduplication.
  pub fn concat(bags: impl IntoIterator<Item = Self>) -> Self {
    let mut merged = Self::default();
    for bag in bags {
      merged.sub.extend(bag.sub);
      merged.pre_num.extend(bag.pre_num);
    }
    merged
  }

  /// Write `sub.txt.parquet` and `pre_num.txt.parquet` into `target`, which
  /// must exist and be empty.
  pub fn save(&self, target: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    ensure_empty_dir(target)?;

    write_parquet(&target.join(files::SUB), &self.sub)?;
    write_parquet(&target.join(files::PRE_NUM), &self.pre_num)?;
    Ok(())
  }

  pub fn load(target: impl AsRef<Path>) -> Result<Self> {
    let target = target.as_ref();
    let sub = read_parquet(&target.join(files::SUB))?;
    let pre_num = read_parquet(&target.join(files::PRE_NUM))?;
    Ok(Self::new(sub, pre_num))
  }
}
