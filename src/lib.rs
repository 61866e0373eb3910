#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps a personal ledger of income and expense entries,
//! summarises it by month and category, and persists it to a local
//! key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::ledger_manager::{Confirmation, EditDraft, LedgerManager, Outcome};
pub use crate::errors::{ImportError, LedgerError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            data_dir = %crate::core::utils::app_data_dir().display(),
            "Budget Tracker tracing initialized."
        );
    });
}
