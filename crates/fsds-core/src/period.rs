//! Arithmetic on integer coded `YYYYMMDD` dates.

use chrono::{Datelike, Months, NaiveDate};

/// Decode a `YYYYMMDD` integer. Returns `None` for impossible dates.
pub fn decode_date(value: i32) -> Option<NaiveDate> {
  if value <= 0 {
    return None;
  }
  let year = value / 10_000;
  let month = (value / 100 % 100) as u32;
  let day = (value % 100) as u32;
  NaiveDate::from_ymd_opt(year, month, day)
}

pub fn encode_date(date: NaiveDate) -> i32 {
  date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
}

/// The same month and day one year earlier.
///
/// When that day does not exist in the prior year the last day of the month
/// is used instead, so `20200229` maps to `20190228`.
pub fn previous_period(period: i32) -> Option<i32> {
  decode_date(period)?
    .checked_sub_months(Months::new(12))
    .map(encode_date)
}
