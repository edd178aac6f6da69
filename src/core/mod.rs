//! Core record types, supplier configuration, and formatting utilities.
//!
//! The types here mirror what the surrounding system persists; the
//! pipeline receives them as immutable snapshots and never mutates or
//! re-validates them.

mod error;
pub mod format;
mod types;

pub use error::*;
pub use types::*;
