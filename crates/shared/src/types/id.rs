//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DebitId` where an
//! `AccountId` is expected. External collaborators key every record by a
//! stable string id, so the wrappers hold strings; freshly minted ids use
//! UUID v7 (time-ordered) rendered to the canonical string form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers over stable string ids.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wraps an existing stable string id.
            #[must_use]
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

typed_id!(AccountId, "Unique identifier for a counterparty account.");
typed_id!(DebitId, "Unique identifier for a debit (sale) record.");
typed_id!(CreditId, "Unique identifier for a credit (payment) record.");
typed_id!(ExpenseId, "Unique identifier for an expense record.");
typed_id!(ItemId, "Unique identifier for an inventory item.");
