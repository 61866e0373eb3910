//! Key-value persistence for ledger records and preferences.

pub mod json_backend;
pub mod memory;
pub mod records;

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
pub use records::{LoadReport, KEY_CATEGORIES, KEY_DARK_MODE, KEY_EXPENSES, KEY_INCOMES};

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// String-keyed store of JSON documents. Writes are synchronous: once `set`
/// returns `Ok`, the value survives a restart.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
