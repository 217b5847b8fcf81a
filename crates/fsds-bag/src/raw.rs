//! [`RawDataBag`] — the three tables of one or more archives kept together.

use std::{
  collections::{BTreeMap, HashMap},
  path::Path,
};

use fsds_core::record::{NumRecord, PreNumRecord, PreRecord, SubmissionRecord};
use serde::Serialize;
use tracing::debug;

use crate::{
  JoinedDataBag, Result,
  columnar::{read_parquet, write_parquet},
  filter::Filter,
  lookup::{AdshMaps, count_by},
  persist::{ensure_empty_dir, files},
};

/// Simple counts over a bag's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDataBagStats {
  pub num_entries:             usize,
  pub pre_entries:             usize,
  pub number_of_reports:       usize,
  pub reports_per_form:        BTreeMap<String, usize>,
  /// Submissions without a period date are not counted here.
  pub reports_per_period_date: BTreeMap<i32, usize>,
}

/// Submissions, presentation rows and numeric facts, plus lookups derived
/// from the submissions once at construction.
///
/// Co-registrants are normalised on construction: empty or blank values
/// become `None`, so every fact of the primary filer groups under one key.
#[derive(Debug, Clone)]
pub struct RawDataBag {
  sub:  Vec<SubmissionRecord>,
  pre:  Vec<PreRecord>,
  num:  Vec<NumRecord>,
  maps: AdshMaps,
}

impl RawDataBag {
  pub fn new(sub: Vec<SubmissionRecord>, pre: Vec<PreRecord>, mut num: Vec<NumRecord>) -> Self {
    for fact in &mut num {
      if fact.coreg.as_deref().is_some_and(|c| c.trim().is_empty()) {
        fact.coreg = None;
      }
    }
    let maps = AdshMaps::from_sub(&sub);
    Self { sub, pre, num, maps }
  }

  /// Parse all three tables of a zip archive.
  pub fn from_archive(archive: impl AsRef<Path>) -> Result<Self> {
    let tables = fsds_archive::read_archive(archive)?;
    Ok(Self::new(tables.sub, tables.pre, tables.num))
  }

  pub fn sub(&self) -> &[SubmissionRecord] { &self.sub }

  pub fn pre(&self) -> &[PreRecord] { &self.pre }

  pub fn num(&self) -> &[NumRecord] { &self.num }

  pub fn adsh_form_map(&self) -> &HashMap<String, String> { &self.maps.form }

  pub fn adsh_period_map(&self) -> &HashMap<String, i32> { &self.maps.period }

  /// Period date one year before each filing's period date.
  pub fn adsh_previous_period_map(&self) -> &HashMap<String, i32> {
    &self.maps.previous_period
  }

  pub fn into_parts(self) -> (Vec<SubmissionRecord>, Vec<PreRecord>, Vec<NumRecord>) {
    (self.sub, self.pre, self.num)
  }

  pub fn filter<F: Filter<Self> + ?Sized>(&self, filter: &F) -> Self { filter.filter(self) }

  /// Inner join of facts to presentation rows on `(adsh, tag, version)`.
  ///
  /// Facts without a presentation row are dropped. A key that appears on
  /// several presentation rows yields one joined row per pairing.
  pub fn get_joined_bag(&self) -> JoinedDataBag {
    let mut pre_by_key: HashMap<(&str, &str, &str), Vec<&PreRecord>> = HashMap::new();
    for p in &self.pre {
      pre_by_key.entry(p.join_key()).or_default().push(p);
    }

    let pre_num: Vec<PreNumRecord> = self
      .num
      .iter()
      .flat_map(|n| {
        pre_by_key
          .get(&n.join_key())
          .into_iter()
          .flatten()
          .map(move |p| PreNumRecord::from_parts(n, p))
      })
      .collect();

    debug!(
      "joined {} of {} facts to {} presentation rows",
      pre_num.len(),
      self.num.len(),
      self.pre.len()
    );
    JoinedDataBag::new(self.sub.clone(), pre_num)
  }

  pub fn statistics(&self) -> RawDataBagStats {
    RawDataBagStats {
      num_entries:             self.num.len(),
      pre_entries:             self.pre.len(),
      number_of_reports:       self.sub.len(),
      reports_per_form:        count_by(&self.sub, |s| Some(s.form.clone())),
      reports_per_period_date: count_by(&self.sub, |s| s.period),
    }
  }

  /// Append the tables of all `bags` in order. Duplicate filings are not
  /// detected.
  pub fn concat(bags: impl IntoIterator<Item = Self>) -> Self {
    let mut sub = Vec::new();
    let mut pre = Vec::new();
    let mut num = Vec::new();
    for bag in bags {
      sub.extend(bag.sub);
      pre.extend(bag.pre);
      num.extend(bag.num);
    }
    Self::new(sub, pre, num)
  }

  /// Write the bag as three parquet files into `target`, which must exist
  /// and be empty.
  pub fn save(&self, target: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    ensure_empty_dir(target)?;

    write_parquet(&target.join(files::SUB), &self.sub)?;
    write_parquet(&target.join(files::PRE), &self.pre)?;
    write_parquet(&target.join(files::NUM), &self.num)?;
    Ok(())
  }

  pub fn load(target: impl AsRef<Path>) -> Result<Self> {
    let target = target.as_ref();
    let sub = read_parquet(&target.join(files::SUB))?;
    let pre = read_parquet(&target.join(files::PRE))?;
    let num = read_parquet(&target.join(files::NUM))?;
    Ok(Self::new(sub, pre, num))
  }
}
