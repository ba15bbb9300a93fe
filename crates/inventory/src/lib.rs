//! `stockroom-inventory` — items, status derivation, gated CRUD, and the
//! natural-language search path.
//!
//! All operations are synchronous and run to completion; the store is owned
//! exclusively by [`Inventory`] and callers pass their session in explicitly.

pub mod item;
pub mod query;
pub mod store;

pub use item::{Item, ItemPatch, ItemStatus};
pub use query::{LogicalOp, SearchFilters};
pub use store::{FindCriteria, Inventory};
