//! Core types and trait definitions for the financial statement data set
//! tools.
//!
//! This crate is deliberately free of file-format and database dependencies.
//! All other crates depend on it.

pub mod index;
pub mod period;
pub mod record;
pub mod store;

pub use index::{IndexReport, ProcessingState, SubmissionHeader};
pub use store::IndexStore;
