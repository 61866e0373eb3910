//! Income and expense records as stored in the ledger.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{contains_folded, Amounted, Dated, Identifiable, Searchable};

/// Stable identifier assigned when an entry is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two ledger sequences an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "incomes" => Ok(EntryKind::Income),
            "expense" | "expenses" => Ok(EntryKind::Expense),
            other => Err(format!("unknown entry kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
}

impl IncomeEntry {
    pub fn new(source: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            source: source.into(),
            amount,
            date: Some(date.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
}

impl ExpenseEntry {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            title: title.into(),
            amount,
            category: category.into(),
            date: Some(date.into()),
        }
    }
}

impl Identifiable for IncomeEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

impl Amounted for IncomeEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Amounted for ExpenseEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for IncomeEntry {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl Dated for ExpenseEntry {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl Searchable for IncomeEntry {
    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.source, needle)
            || self.date().is_some_and(|date| contains_folded(date, needle))
    }
}

impl Searchable for ExpenseEntry {
    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle)
            || contains_folded(&self.category, needle)
            || self.date().is_some_and(|date| contains_folded(date, needle))
    }
}

/// Field decoders for stored and imported records. Stored data may come from
/// older builds or hand-edited files, so a mistyped field degrades to a usable
/// value instead of rejecting the whole record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use uuid::Uuid;

    use super::EntryId;

    /// Unreadable ids are replaced with a fresh one.
    pub(super) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntryId, D::Error> {
        let id = match Value::deserialize(deserializer)? {
            Value::String(text) => Uuid::parse_str(text.trim()).map(EntryId).ok(),
            _ => None,
        };
        Ok(id.unwrap_or_default())
    }

    /// Numbers and numeric strings; anything else reads as `0.0`.
    pub(super) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let amount = match Value::deserialize(deserializer)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(amount.filter(|value| value.is_finite()).unwrap_or(0.0))
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub(super) fn optional_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}
