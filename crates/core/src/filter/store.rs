//! Filter persistence collaborator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tally_shared::types::AccountId;

use super::types::Filter;

/// Per-account persistence of the active filter.
///
/// A missing entry falls back to [`Filter::default`]; the store never
/// needs to exist for reads to work. Same seam shape as the baseline
/// store: shared references, interior mutability behind the
/// implementation.
pub trait FilterStore: Send + Sync {
    /// Returns the stored filter for an account, if any.
    fn get(&self, account_id: &AccountId) -> Option<Filter>;

    /// Stores the active filter for an account, replacing any previous
    /// one.
    fn set(&self, account_id: AccountId, filter: Filter);

    /// The filter to apply: stored preference or the default.
    fn effective(&self, account_id: &AccountId) -> Filter {
        self.get(account_id).unwrap_or_default()
    }
}

/// In-memory [`FilterStore`] for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFilterStore {
    filters: Arc<Mutex<HashMap<AccountId, Filter>>>,
}

impl InMemoryFilterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilterStore for InMemoryFilterStore {
    fn get(&self, account_id: &AccountId) -> Option<Filter> {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account_id)
            .copied()
    }

    fn set(&self, account_id: AccountId, filter: Filter) {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account_id, filter);
    }
}
