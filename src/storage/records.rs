//! Mapping between the ledger and the keys it occupies in a
//! [`KeyValueStore`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    domain::{CategorySet, ExpenseEntry, IncomeEntry},
    errors::LedgerError,
    ledger::Ledger,
};

use super::{KeyValueStore, Result};

pub const KEY_INCOMES: &str = "incomes";
pub const KEY_EXPENSES: &str = "expenses";
pub const KEY_DARK_MODE: &str = "darkMode";
pub const KEY_CATEGORIES: &str = "categories";

/// Everything read back from the store at startup, plus anything that had to
/// be discarded along the way.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub categories: CategorySet,
    pub dark_mode: bool,
    pub warnings: Vec<String>,
}

/// Reads the ledger and preferences. Each key is decoded on its own: a
/// corrupt `incomes` document leaves `expenses` intact, and vice versa.
pub fn load(store: &dyn KeyValueStore) -> LoadReport {
    let mut warnings = Vec::new();
    let incomes: Vec<IncomeEntry> = load_sequence(store, KEY_INCOMES, &mut warnings);
    let expenses: Vec<ExpenseEntry> = load_sequence(store, KEY_EXPENSES, &mut warnings);

    let mut ledger = Ledger {
        incomes,
        expenses,
    };
    let reassigned = ledger.ensure_unique_ids();
    if reassigned > 0 {
        warnings.push(format!("reassigned {reassigned} duplicate entry id(s)"));
    }

    let categories = match read_json::<CategorySet>(store, KEY_CATEGORIES) {
        Ok(Some(set)) => set,
        Ok(None) => CategorySet::default(),
        Err(reason) => {
            warnings.push(format!("`{KEY_CATEGORIES}` unreadable, using defaults: {reason}"));
            CategorySet::default()
        }
    };

    let dark_mode = match read_json::<bool>(store, KEY_DARK_MODE) {
        Ok(value) => value.unwrap_or(false),
        Err(reason) => {
            warnings.push(format!("`{KEY_DARK_MODE}` unreadable: {reason}"));
            false
        }
    };

    for warning in &warnings {
        tracing::warn!(%warning, "store load");
    }
    tracing::info!(
        incomes = ledger.incomes.len(),
        expenses = ledger.expenses.len(),
        "ledger loaded"
    );

    LoadReport {
        ledger,
        categories,
        dark_mode,
        warnings,
    }
}

/// Writes both sequences. The second write is attempted even when the
/// first fails; the first failure is returned.
pub fn persist(store: &dyn KeyValueStore, ledger: &Ledger) -> Result<()> {
    let incomes = serde_json::to_string(&ledger.incomes)?;
    let expenses = serde_json::to_string(&ledger.expenses)?;
    let first = store.set(KEY_INCOMES, &incomes);
    let second = store.set(KEY_EXPENSES, &expenses);
    first.and(second)
}

/// Drops both sequences from the store. Preferences and categories stay.
pub fn reset(store: &dyn KeyValueStore) -> Result<()> {
    let first = store.remove(KEY_INCOMES);
    let second = store.remove(KEY_EXPENSES);
    first.and(second)
}

pub fn persist_categories(store: &dyn KeyValueStore, categories: &CategorySet) -> Result<()> {
    store.set(KEY_CATEGORIES, &serde_json::to_string(categories)?)
}

pub fn persist_dark_mode(store: &dyn KeyValueStore, enabled: bool) -> Result<()> {
    store.set(KEY_DARK_MODE, &serde_json::to_string(&enabled)?)
}

/// Converts a JSON array into entries. Every object is kept, with unreadable
/// fields falling back to defaults; other elements are skipped. Returns the
/// entries and the number skipped.
pub(crate) fn decode_entries<T: DeserializeOwned>(items: Vec<Value>) -> (Vec<T>, usize) {
    let mut entries = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        if !item.is_object() {
            skipped += 1;
            continue;
        }
        match serde_json::from_value(item) {
            Ok(entry) => entries.push(entry),
            Err(_) => skipped += 1,
        }
    }
    (entries, skipped)
}

fn load_sequence<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    match read_json::<Value>(store, key) {
        Ok(None) | Ok(Some(Value::Null)) => Vec::new(),
        Ok(Some(Value::Array(items))) => {
            let (entries, skipped) = decode_entries(items);
            if skipped > 0 {
                warnings.push(format!("skipped {skipped} malformed `{key}` record(s)"));
            }
            entries
        }
        Ok(Some(_)) => {
            warnings.push(format!("`{key}` is not a list, starting empty"));
            Vec::new()
        }
        Err(reason) => {
            warnings.push(format!("`{key}` unreadable, starting empty: {reason}"));
            Vec::new()
        }
    }
}

fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> std::result::Result<Option<T>, String> {
    let raw = store.get(key).map_err(|err| err.to_string())?;
    match raw {
        None => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| LedgerError::from(err).to_string()),
    }
}
