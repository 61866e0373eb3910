//! The in-memory ledger: two independently ordered entry sequences.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::Ledger;
