//! SQLite backend for the index table and the processing-state table.
//!
//! Every call opens its own [`rusqlite::Connection`] and drops it before
//! returning; nothing is pooled and no transaction spans two calls.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::IndexTables;
pub use store::SqliteIndexStore;
