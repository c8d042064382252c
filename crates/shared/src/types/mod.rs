//! Shared type definitions.

mod entity;
mod id;

pub use entity::EntityKind;
pub use id::{AccountId, CreditId, DebitId, ExpenseId, ItemId};
