//! Baseline snapshot persistence.

use std::sync::{Arc, Mutex, PoisonError};

use super::types::BaselineSnapshot;

/// Storage for the single baseline slot.
///
/// There is exactly one slot: saving replaces whatever was there, and a
/// saved snapshot is never edited in place.
pub trait BaselineStore: Send + Sync {
    /// Returns the saved baseline, if any.
    fn load(&self) -> Option<BaselineSnapshot>;

    /// Replaces the baseline wholesale.
    fn save(&self, snapshot: BaselineSnapshot);
}

/// In-memory baseline store.
#[derive(Clone, Default)]
pub struct InMemoryBaselineStore {
    slot: Arc<Mutex<Option<BaselineSnapshot>>>,
}

impl InMemoryBaselineStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaselineStore for InMemoryBaselineStore {
    fn load(&self) -> Option<BaselineSnapshot> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, snapshot: BaselineSnapshot) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }
}
