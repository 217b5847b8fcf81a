//! Filter objects for bags.
//!
//! A filter takes a bag and returns a new bag of the same kind; bags only
//! know the [`Filter`] trait, never the concrete filters.

use std::collections::HashSet;

use fsds_core::record::NumRecord;

use crate::{JoinedDataBag, RawDataBag};

pub trait Filter<B> {
  fn filter(&self, bag: &B) -> B;
}

fn keep<T: Clone>(rows: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
  rows.iter().filter(|r| predicate(*r)).cloned().collect()
}

fn to_set<S: Into<String>>(values: impl IntoIterator<Item = S>) -> HashSet<String> {
  values.into_iter().map(Into::into).collect()
}

// ─── By accession number ─────────────────────────────────────────────────────

/// Keeps only the listed filings, in every table.
#[derive(Debug, Clone)]
pub struct AdshFilter {
  adshs: HashSet<String>,
}

impl AdshFilter {
  pub fn new<S: Into<String>>(adshs: impl IntoIterator<Item = S>) -> Self {
    Self { adshs: to_set(adshs) }
  }
}

impl Filter<RawDataBag> for AdshFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    RawDataBag::new(
      keep(bag.sub(), |s| self.adshs.contains(&s.adsh)),
      keep(bag.pre(), |p| self.adshs.contains(&p.adsh)),
      keep(bag.num(), |n| self.adshs.contains(&n.adsh)),
    )
  }
}

impl Filter<JoinedDataBag> for AdshFilter {
  fn filter(&self, bag: &JoinedDataBag) -> JoinedDataBag {
    JoinedDataBag::new(
      keep(bag.sub(), |s| self.adshs.contains(&s.adsh)),
      keep(bag.pre_num(), |r| self.adshs.contains(&r.adsh)),
    )
  }
}

// ─── By statement ────────────────────────────────────────────────────────────

/// Keeps presentation rows of the listed statements (`BS`, `IS`, `CF`, ...).
///
/// Facts are left alone on a raw bag; the join drops those no longer
/// presented.
#[derive(Debug, Clone)]
pub struct StmtFilter {
  stmts: HashSet<String>,
}

impl StmtFilter {
  pub fn new<S: Into<String>>(stmts: impl IntoIterator<Item = S>) -> Self {
    Self { stmts: to_set(stmts) }
  }
}

impl Filter<RawDataBag> for StmtFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    RawDataBag::new(
      bag.sub().to_vec(),
      keep(bag.pre(), |p| self.stmts.contains(&p.stmt)),
      bag.num().to_vec(),
    )
  }
}

impl Filter<JoinedDataBag> for StmtFilter {
  fn filter(&self, bag: &JoinedDataBag) -> JoinedDataBag {
    JoinedDataBag::new(
      bag.sub().to_vec(),
      keep(bag.pre_num(), |r| self.stmts.contains(&r.stmt)),
    )
  }
}

// ─── By tag ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TagFilter {
  tags: HashSet<String>,
}

impl TagFilter {
  pub fn new<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
    Self { tags: to_set(tags) }
  }
}

impl Filter<RawDataBag> for TagFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    RawDataBag::new(
      bag.sub().to_vec(),
      keep(bag.pre(), |p| self.tags.contains(&p.tag)),
      keep(bag.num(), |n| self.tags.contains(&n.tag)),
    )
  }
}

impl Filter<JoinedDataBag> for TagFilter {
  fn filter(&self, bag: &JoinedDataBag) -> JoinedDataBag {
    JoinedDataBag::new(
      bag.sub().to_vec(),
      keep(bag.pre_num(), |r| self.tags.contains(&r.tag)),
    )
  }
}

// ─── By co-registrant ────────────────────────────────────────────────────────

/// Keeps only the facts reported for the primary filer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainCoregFilter;

impl Filter<RawDataBag> for MainCoregFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    RawDataBag::new(
      bag.sub().to_vec(),
      bag.pre().to_vec(),
      keep(bag.num(), |n| n.coreg.is_none()),
    )
  }
}

impl Filter<JoinedDataBag> for MainCoregFilter {
  fn filter(&self, bag: &JoinedDataBag) -> JoinedDataBag {
    JoinedDataBag::new(bag.sub().to_vec(), keep(bag.pre_num(), |r| r.coreg.is_none()))
  }
}

// ─── By report period ────────────────────────────────────────────────────────

/// Keeps facts whose `ddate` is the period date of their filing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPeriodFilter;

impl Filter<RawDataBag> for ReportPeriodFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    let period = bag.adsh_period_map();
    let on_period = |n: &NumRecord| period.get(&n.adsh) == Some(&n.ddate);
    RawDataBag::new(bag.sub().to_vec(), bag.pre().to_vec(), keep(bag.num(), on_period))
  }
}

/// Keeps facts whose `ddate` is the period date of their filing or the date
/// one year earlier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPeriodAndPreviousPeriodFilter;

impl Filter<RawDataBag> for ReportPeriodAndPreviousPeriodFilter {
  fn filter(&self, bag: &RawDataBag) -> RawDataBag {
    let period = bag.adsh_period_map();
    let previous = bag.adsh_previous_period_map();
    let on_either = |n: &NumRecord| {
      period.get(&n.adsh) == Some(&n.ddate) || previous.get(&n.adsh) == Some(&n.ddate)
    };
    RawDataBag::new(bag.sub().to_vec(), bag.pre().to_vec(), keep(bag.num(), on_either))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_data::{self, AMAZON, APPLE};

  fn bag() -> RawDataBag { RawDataBag::new(test_data::sub(), test_data::pre(), test_data::num()) }

  #[test]
  fn adsh_filter_applies_to_all_tables() {
    let filtered = bag().filter(&AdshFilter::new([APPLE]));
    assert_eq!(filtered.sub().len(), 1);
    assert_eq!(filtered.pre().len(), 2);
    assert_eq!(filtered.num().len(), 5);
    assert_eq!(filtered.adsh_form_map().len(), 1);
  }

  #[test]
  fn tag_filter_keeps_pre_and_num() {
    let filtered = bag().filter(&TagFilter::new(["Assets"]));
    assert_eq!(filtered.sub().len(), 3);
    assert_eq!(filtered.pre().len(), 3);
    assert_eq!(filtered.num().len(), 6);
  }

  #[test]
  fn main_coreg_filter_drops_coregistrant_facts() {
    let filtered = bag().filter(&MainCoregFilter);
    assert_eq!(filtered.num().len(), 10);
    assert!(filtered.num().iter().all(|n| n.coreg.is_none()));
  }

  #[test]
  fn report_period_filter_uses_period_map() {
    let filtered = bag().filter(&ReportPeriodFilter);
    assert_eq!(filtered.num().len(), 8);
    assert!(filtered.num().iter().all(|n| n.ddate != 20181231 && n.ddate != 20190228));
  }

  #[test]
  fn previous_period_filter_adds_prior_year() {
    let filtered = bag().filter(&ReportPeriodAndPreviousPeriodFilter);
    assert_eq!(filtered.num().len(), 10);
    assert!(
      filtered
        .num()
        .iter()
        .any(|n| n.adsh == AMAZON && n.ddate == 20181231)
    );
    assert!(
      filtered
        .num()
        .iter()
        .any(|n| n.adsh == APPLE && n.ddate == 20190228)
    );
  }

  #[test]
  fn filters_apply_to_joined_bags() {
    let joined = bag().get_joined_bag();

    let balance_sheet = joined.filter(&StmtFilter::new(["BS"]));
    assert_eq!(balance_sheet.pre_num().len(), 6);

    let main = joined.filter(&MainCoregFilter);
    assert_eq!(main.pre_num().len(), joined.pre_num().len() - 1);

    let amazon = joined.filter(&AdshFilter::new([AMAZON]));
    assert_eq!(amazon.sub().len(), 1);
    assert_eq!(amazon.pre_num().len(), 2);

    let revenues = joined.filter(&TagFilter::new(["Revenues"]));
    assert_eq!(revenues.pre_num().len(), 2);
  }

  #[test]
  fn filters_compose_as_trait_objects() {
    let chain: Vec<Box<dyn Filter<RawDataBag>>> = vec![
      Box::new(StmtFilter::new(["BS"])),
      Box::new(MainCoregFilter),
      Box::new(ReportPeriodFilter),
    ];
    let filtered = chain.iter().fold(bag(), |b, f| b.filter(f.as_ref()));

    assert_eq!(filtered.pre().len(), 3);
    assert_eq!(filtered.get_joined_bag().pre_num().len(), 3);
  }
}
