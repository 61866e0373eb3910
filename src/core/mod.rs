//! Ledger services, date handling, and the stateful manager that ties them
//! to persistence.

pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;
