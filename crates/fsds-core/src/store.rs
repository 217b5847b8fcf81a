//! The `IndexStore` trait.
//!
//! Implemented by storage backends (e.g. `fsds-store-sqlite`). The indexer
//! depends on this abstraction, not on any concrete backend. The trait is a
//! narrow write/read-all contract; it carries no query logic.

use crate::index::{IndexReport, ProcessingState};

/// Durable record of indexed units plus the index table they feed.
///
/// Idempotency is the caller's responsibility: `record_state` appends.
pub trait IndexStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every processing-state row, in no particular order.
  fn all_states(&self) -> Result<Vec<ProcessingState>, Self::Error>;

  /// Append one processing-state row.
  fn record_state(&self, state: &ProcessingState) -> Result<(), Self::Error>;

  /// Append rows to the index table.
  fn add_index_reports(&self, reports: &[IndexReport]) -> Result<(), Self::Error>;
}
