//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. It maintains derived aggregates over a mutable
//! transaction ledger reached only through collaborator traits.
//!
//! # Modules
//!
//! - `ledger` - Record types and the read-only ledger collaborator
//! - `cycle` - Zero-balance financial cycle segmentation
//! - `filter` - Filter resolution and balance aggregation
//! - `ordering` - Deterministic same-day settlement ordering
//! - `cache` - Expiring, explicitly-invalidated derived-value caches
//! - `recon` - Reconciliation against a saved baseline snapshot

pub mod cache;
pub mod cycle;
pub mod filter;
pub mod ledger;
pub mod ordering;
pub mod recon;
