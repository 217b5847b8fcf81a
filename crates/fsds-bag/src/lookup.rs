//! Lookup maps derived from a submission table and the group-by used for
//! statistics.

use std::collections::{BTreeMap, HashMap};

use fsds_core::{period::previous_period, record::SubmissionRecord};

/// Per-filing lookups keyed by accession number.
///
/// Submissions without a period date have no entry in either period map.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdshMaps {
  pub form:            HashMap<String, String>,
  pub period:          HashMap<String, i32>,
  pub previous_period: HashMap<String, i32>,
}

impl AdshMaps {
  pub fn from_sub(sub: &[SubmissionRecord]) -> Self {
    let form = sub
      .iter()
      .map(|s| (s.adsh.clone(), s.form.clone()))
      .collect();

    let period: HashMap<String, i32> = sub
      .iter()
      .filter_map(|s| Some((s.adsh.clone(), s.period?)))
      .collect();

    let previous_period = period
      .iter()
      .filter_map(|(adsh, p)| Some((adsh.clone(), previous_period(*p)?)))
      .collect();

    Self { form, period, previous_period }
  }
}

/// Count rows per key; rows whose key is `None` are not counted.
pub(crate) fn count_by<T, K: Ord>(
  rows: &[T],
  key:  impl Fn(&T) -> Option<K>,
) -> BTreeMap<K, usize> {
  let mut counts = BTreeMap::new();
  for k in rows.iter().filter_map(key) {
    *counts.entry(k).or_insert(0) += 1;
  }
  counts
}
