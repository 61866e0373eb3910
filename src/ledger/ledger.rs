use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, EntryKind, ExpenseEntry, Identifiable, IncomeEntry};

/// Income and expense sequences. Insertion order is significant: it is the
/// order used for display and for row-number addressing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub incomes: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

impl Ledger {
    pub fn new(incomes: Vec<IncomeEntry>, expenses: Vec<ExpenseEntry>) -> Self {
        let mut ledger = Self { incomes, expenses };
        ledger.ensure_unique_ids();
        ledger
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    pub fn len(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Income => self.incomes.len(),
            EntryKind::Expense => self.expenses.len(),
        }
    }

    pub fn income(&self, id: EntryId) -> Option<&IncomeEntry> {
        self.incomes.iter().find(|entry| entry.id == id)
    }

    pub fn expense(&self, id: EntryId) -> Option<&ExpenseEntry> {
        self.expenses.iter().find(|entry| entry.id == id)
    }

    /// Current position of an entry in its owning sequence.
    pub fn position_of(&self, kind: EntryKind, id: EntryId) -> Option<usize> {
        match kind {
            EntryKind::Income => position(&self.incomes, id),
            EntryKind::Expense => position(&self.expenses, id),
        }
    }

    /// Resolves the entry currently sitting at `index`.
    pub fn id_at(&self, kind: EntryKind, index: usize) -> Option<EntryId> {
        match kind {
            EntryKind::Income => self.incomes.get(index).map(Identifiable::id),
            EntryKind::Expense => self.expenses.get(index).map(Identifiable::id),
        }
    }

    pub fn push_income(&mut self, entry: IncomeEntry) -> EntryId {
        let id = entry.id;
        self.incomes.push(entry);
        id
    }

    pub fn push_expense(&mut self, entry: ExpenseEntry) -> EntryId {
        let id = entry.id;
        self.expenses.push(entry);
        id
    }

    /// Overwrites the entry with the same id in place. Returns `false` when
    /// no such entry exists.
    pub fn replace_income(&mut self, entry: IncomeEntry) -> bool {
        match position(&self.incomes, entry.id) {
            Some(index) => {
                self.incomes[index] = entry;
                true
            }
            None => false,
        }
    }

    pub fn replace_expense(&mut self, entry: ExpenseEntry) -> bool {
        match position(&self.expenses, entry.id) {
            Some(index) => {
                self.expenses[index] = entry;
                true
            }
            None => false,
        }
    }

    /// Removes an entry, shifting later entries down by one position.
    pub fn remove(&mut self, kind: EntryKind, id: EntryId) -> bool {
        match kind {
            EntryKind::Income => match position(&self.incomes, id) {
                Some(index) => {
                    self.incomes.remove(index);
                    true
                }
                None => false,
            },
            EntryKind::Expense => match position(&self.expenses, id) {
                Some(index) => {
                    self.expenses.remove(index);
                    true
                }
                None => false,
            },
        }
    }

    pub fn clear(&mut self) {
        self.incomes.clear();
        self.expenses.clear();
    }

    /// Reassigns ids that collide with an earlier entry. Hand-edited or
    /// imported documents may repeat records verbatim.
    pub fn ensure_unique_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut reassigned = 0;
        for entry in &mut self.incomes {
            if !seen.insert(entry.id) {
                entry.id = EntryId::new();
                seen.insert(entry.id);
                reassigned += 1;
            }
        }
        for entry in &mut self.expenses {
            if !seen.insert(entry.id) {
                entry.id = EntryId::new();
                seen.insert(entry.id);
                reassigned += 1;
            }
        }
        reassigned
    }
}

fn position<T: Identifiable>(entries: &[T], id: EntryId) -> Option<usize> {
    entries.iter().position(|entry| entry.id() == id)
}
