//! In-memory containers for the tables of financial statement data sets.
//!
//! A [`RawDataBag`] keeps `sub`, `pre` and `num` of one or more archives
//! together; [`RawDataBag::get_joined_bag`] derives a [`JoinedDataBag`] in
//! which every fact is paired with the presentation row it is shown in. Both
//! persist to a directory of parquet files.

mod lookup;
mod persist;

pub mod columnar;
pub mod error;
pub mod filter;
pub mod joined;
pub mod raw;

pub use error::{Error, Result};
pub use filter::Filter;
pub use joined::JoinedDataBag;
pub use persist::files;
pub use raw::{RawDataBag, RawDataBagStats};

#[cfg(test)]
mod test_data;
