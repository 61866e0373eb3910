//! User-managed labels attached to expense entries.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Health",
    "Education",
    "Other",
];

/// Ordered list of unique category names.
///
/// The set is independent of the entries: removing or renaming a category
/// never rewrites `ExpenseEntry::category`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategorySet {
    names: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::from_names(DEFAULT_CATEGORIES)
    }
}

impl CategorySet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            let name = name.into();
            let trimmed = name.trim();
            if !trimmed.is_empty() && set.position(trimmed).is_none() {
                set.names.push(trimmed.to_string());
            }
        }
        set
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Case-insensitive lookup of a category's position.
    pub fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.names
            .iter()
            .position(|existing| existing.to_lowercase() == needle)
    }

    pub(crate) fn push(&mut self, name: String) {
        self.names.push(name);
    }

    pub(crate) fn replace_at(&mut self, index: usize, name: String) {
        self.names[index] = name;
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> String {
        self.names.remove(index)
    }
}
