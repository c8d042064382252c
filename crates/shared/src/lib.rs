//! Shared types for Tally.
//!
//! Typed entity IDs, entity-kind classification, and the recognized
//! ledger date formats. Every other crate in the workspace depends on
//! this one; it depends on nothing domain-specific.

pub mod dates;
pub mod types;
