use serde_json::Value;

use crate::{
    errors::{ImportError, Result},
    ledger::Ledger,
    storage::records::decode_entries,
};

/// Serialises the ledger as `{ "incomes": [...], "expenses": [...] }`.
pub fn export_json(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string_pretty(ledger)?)
}

/// Parses an exported document. Text that is not JSON is a parse error;
/// JSON without both lists is a shape error.
pub fn parse_import(text: &str) -> std::result::Result<Ledger, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Parse(err.to_string()))?;
    ledger_from_value(value)
}

/// Builds a ledger from a document that has `incomes` and `expenses` arrays.
/// Elements are not schema-checked beyond what an entry needs to exist;
/// elements that are not objects are dropped.
pub fn ledger_from_value(value: Value) -> std::result::Result<Ledger, ImportError> {
    let Value::Object(mut document) = value else {
        return Err(ImportError::InvalidShape);
    };
    let (Some(Value::Array(incomes)), Some(Value::Array(expenses))) =
        (document.remove("incomes"), document.remove("expenses"))
    else {
        return Err(ImportError::InvalidShape);
    };

    let (incomes, skipped_incomes) = decode_entries(incomes);
    let (expenses, skipped_expenses) = decode_entries(expenses);
    if skipped_incomes + skipped_expenses > 0 {
        tracing::warn!(
            skipped_incomes,
            skipped_expenses,
            "import dropped elements that are not records"
        );
    }
    Ok(Ledger::new(incomes, expenses))
}
