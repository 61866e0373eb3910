//! Domain types for ledger entries and expense categories.

pub mod category;
pub mod common;
pub mod entry;

pub use category::{CategorySet, DEFAULT_CATEGORIES};
pub use common::{Amounted, Dated, Identifiable, Searchable};
pub use entry::{EntryId, EntryKind, ExpenseEntry, IncomeEntry};
