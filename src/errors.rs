use thiserror::Error;

use crate::domain::EntryId;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("Persistence unavailable: {0}")]
    Persistence(String),
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),
    #[error("No entry at position {0}")]
    InvalidIndex(usize),
    #[error("Category error: {0}")]
    Category(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Rejections raised before an entry is created or updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },
    #[error("amount must be a number greater than zero, got `{0}`")]
    InvalidAmount(String),
    #[error("invalid {axis} filter `{value}`")]
    InvalidPeriod { axis: &'static str, value: String },
}

/// Failures while replacing the ledger from an exported document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Invalid file: expected `incomes` and `expenses` lists")]
    InvalidShape,
    #[error("Invalid file: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
