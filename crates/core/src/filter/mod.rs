//! Filter resolution and balance aggregation.
//!
//! An active filter selects a subset of one account's transactions (a
//! cycle, a named time window, or a custom range) and a debit/credit
//! inclusion mask, then derives the filtered balance.

mod aggregator;
mod store;
mod types;

pub use aggregator::{FilterOutcome, resolve};
pub use store::{FilterStore, InMemoryFilterStore};
pub use types::{DateWindow, Filter, KindMask, Selection, TimePreset};
