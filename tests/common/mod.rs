#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_tracker::{
    config::ConfigManager,
    core::{ledger_manager::LedgerManager, time::FixedClock},
    storage::JsonStorage,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// 17 May 2024, 2:05 PM.
pub fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap(),
    )
}

/// Opens a manager over a JSON store rooted at `base`.
pub fn open_manager(base: &PathBuf) -> LedgerManager {
    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let (manager, warnings) = LedgerManager::open(Box::new(storage), Box::new(fixed_clock()));
    assert!(warnings.is_empty(), "unexpected load warnings: {warnings:?}");
    manager
}

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let manager = open_manager(&base);
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (manager, config_manager, base)
}
