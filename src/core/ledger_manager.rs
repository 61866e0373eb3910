//! Facade that owns the ledger, the category list, edit state, and
//! preferences, and writes them back to the store after every change.

use crate::core::services::{
    CategoryService, CategoryTotal, EditState, ExpenseForm, FilterService, IncomeForm,
    LedgerView, MonthlySummaryRow, PeriodFilter, ServiceResult, Submission, SummaryService,
    Totals, TransactionService,
};
use crate::core::time::Clock;
use crate::domain::{CategorySet, EntryId, EntryKind};
use crate::errors::LedgerError;
use crate::export;
use crate::ledger::Ledger;
use crate::storage::{records, KeyValueStore, LoadReport};

/// Gate for irreversible actions. Returning `false` cancels the action and
/// leaves all state untouched.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirmation for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a change that was applied in memory. `persist_warning` is set
/// when the store could not be written; the change stays in effect for the
/// rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub persist_warning: Option<String>,
}

impl<T> Outcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.persist_warning.is_none()
    }
}

/// Prefilled form returned when editing begins.
#[derive(Debug, Clone, PartialEq)]
pub enum EditDraft {
    Income(IncomeForm),
    Expense(ExpenseForm),
}

pub struct LedgerManager {
    ledger: Ledger,
    categories: CategorySet,
    dark_mode: bool,
    income_edit: EditState,
    expense_edit: EditState,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl LedgerManager {
    /// Loads everything the store holds. Unreadable keys fall back to empty
    /// or default values and are listed in the returned warnings.
    pub fn open(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> (Self, Vec<String>) {
        let LoadReport {
            ledger,
            categories,
            dark_mode,
            warnings,
        } = records::load(storage.as_ref());
        let manager = Self {
            ledger,
            categories,
            dark_mode,
            income_edit: EditState::Idle,
            expense_edit: EditState::Idle,
            storage,
            clock,
        };
        (manager, warnings)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn edit_state(&self, kind: EntryKind) -> EditState {
        match kind {
            EntryKind::Income => self.income_edit,
            EntryKind::Expense => self.expense_edit,
        }
    }

    fn edit_state_mut(&mut self, kind: EntryKind) -> &mut EditState {
        match kind {
            EntryKind::Income => &mut self.income_edit,
            EntryKind::Expense => &mut self.expense_edit,
        }
    }

    /// Loads an entry into its form. Replaces any edit already in progress
    /// for the same kind.
    pub fn begin_edit(&mut self, kind: EntryKind, id: EntryId) -> ServiceResult<EditDraft> {
        let draft = match kind {
            EntryKind::Income => EditDraft::Income(TransactionService::income_form(&self.ledger, id)?),
            EntryKind::Expense => {
                EditDraft::Expense(TransactionService::expense_form(&self.ledger, id)?)
            }
        };
        *self.edit_state_mut(kind) = EditState::Editing(id);
        tracing::debug!(%kind, %id, "edit started");
        Ok(draft)
    }

    /// Same as [`begin_edit`](Self::begin_edit), addressed by current position.
    pub fn begin_edit_at(&mut self, kind: EntryKind, index: usize) -> ServiceResult<EditDraft> {
        let id = self.id_at(kind, index)?;
        self.begin_edit(kind, id)
    }

    pub fn cancel_edit(&mut self, kind: EntryKind) {
        *self.edit_state_mut(kind) = EditState::Idle;
    }

    pub fn submit_income(&mut self, form: &IncomeForm) -> ServiceResult<Outcome<Submission>> {
        let submission = TransactionService::submit_income(
            &mut self.ledger,
            &mut self.income_edit,
            form,
            self.clock.as_ref(),
        )?;
        tracing::debug!(?submission, "income submitted");
        Ok(self.persist_ledger(submission))
    }

    pub fn submit_expense(&mut self, form: &ExpenseForm) -> ServiceResult<Outcome<Submission>> {
        let submission = TransactionService::submit_expense(
            &mut self.ledger,
            &mut self.expense_edit,
            form,
            self.clock.as_ref(),
        )?;
        tracing::debug!(?submission, "expense submitted");
        Ok(self.persist_ledger(submission))
    }

    /// Deletes an entry after confirmation and returns the position it held.
    /// `Ok(None)` means the user declined.
    pub fn remove(
        &mut self,
        kind: EntryKind,
        id: EntryId,
        confirmation: &mut dyn Confirmation,
    ) -> ServiceResult<Option<Outcome<usize>>> {
        if self.ledger.position_of(kind, id).is_none() {
            return Err(LedgerError::EntryNotFound(id));
        }
        if !confirmation.confirm(&format!("Delete this {kind} entry?")) {
            return Ok(None);
        }
        let index = TransactionService::remove(&mut self.ledger, kind, id)?;
        if self.edit_state(kind) == EditState::Editing(id) {
            self.cancel_edit(kind);
        }
        tracing::debug!(%kind, %id, index, "entry removed");
        Ok(Some(self.persist_ledger(index)))
    }

    pub fn remove_at(
        &mut self,
        kind: EntryKind,
        index: usize,
        confirmation: &mut dyn Confirmation,
    ) -> ServiceResult<Option<Outcome<usize>>> {
        let id = self.id_at(kind, index)?;
        self.remove(kind, id, confirmation)
    }

    /// Clears both entry lists from the store and reloads fresh state.
    /// Returns `Ok(None)` when the user declines.
    pub fn reset(
        &mut self,
        confirmation: &mut dyn Confirmation,
    ) -> ServiceResult<Option<Outcome<()>>> {
        if !confirmation.confirm("Clear ALL data?") {
            return Ok(None);
        }
        let cleared = records::reset(self.storage.as_ref());
        let LoadReport {
            ledger,
            categories,
            dark_mode,
            ..
        } = records::load(self.storage.as_ref());
        self.ledger = ledger;
        self.categories = categories;
        self.dark_mode = dark_mode;
        self.income_edit = EditState::Idle;
        self.expense_edit = EditState::Idle;
        match cleared {
            Ok(()) => {
                tracing::info!("ledger reset");
                Ok(Some(Outcome {
                    value: (),
                    persist_warning: None,
                }))
            }
            Err(err) => {
                // The store still holds the old lists; keep the session empty regardless.
                self.ledger = Ledger::default();
                tracing::warn!(error = %err, "reset could not clear the store");
                Ok(Some(Outcome {
                    value: (),
                    persist_warning: Some(err.to_string()),
                }))
            }
        }
    }

    /// Replaces the whole ledger with an exported JSON document.
    pub fn import_json(&mut self, text: &str) -> ServiceResult<Outcome<(usize, usize)>> {
        let ledger = export::parse_import(text)?;
        Ok(self.import_replace(ledger))
    }

    fn import_replace(&mut self, ledger: Ledger) -> Outcome<(usize, usize)> {
        let counts = (ledger.incomes.len(), ledger.expenses.len());
        self.ledger = ledger;
        self.income_edit = EditState::Idle;
        self.expense_edit = EditState::Idle;
        tracing::info!(incomes = counts.0, expenses = counts.1, "ledger imported");
        self.persist_ledger(counts)
    }

    pub fn export_json(&self) -> ServiceResult<String> {
        export::export_json(&self.ledger)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Outcome<bool> {
        self.dark_mode = enabled;
        let result = records::persist_dark_mode(self.storage.as_ref(), enabled);
        self.outcome(enabled, result)
    }

    pub fn toggle_dark_mode(&mut self) -> Outcome<bool> {
        self.set_dark_mode(!self.dark_mode)
    }

    pub fn add_category(&mut self, name: &str) -> ServiceResult<Outcome<()>> {
        CategoryService::add(&mut self.categories, name)?;
        Ok(self.persist_categories(()))
    }

    pub fn rename_category(&mut self, current: &str, new_name: &str) -> ServiceResult<Outcome<()>> {
        CategoryService::rename(&mut self.categories, current, new_name)?;
        Ok(self.persist_categories(()))
    }

    pub fn remove_category(&mut self, name: &str) -> ServiceResult<Outcome<String>> {
        let removed = CategoryService::remove(&mut self.categories, name)?;
        Ok(self.persist_categories(removed))
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(&self.ledger)
    }

    pub fn monthly_summary(&self) -> Vec<MonthlySummaryRow> {
        SummaryService::monthly_summary(&self.ledger)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        SummaryService::category_breakdown(&self.ledger.expenses)
    }

    pub fn available_years(&self) -> Vec<i32> {
        SummaryService::available_years(&self.ledger)
    }

    pub fn view_by_period(&self, filter: &PeriodFilter) -> LedgerView<'_> {
        FilterService::by_period(&self.ledger, filter)
    }

    pub fn view_by_search(&self, query: &str) -> LedgerView<'_> {
        FilterService::by_search(&self.ledger, query)
    }

    pub fn is_current_period(&self, filter: &PeriodFilter) -> bool {
        FilterService::is_current_period(filter, self.clock.today())
    }

    fn id_at(&self, kind: EntryKind, index: usize) -> ServiceResult<EntryId> {
        self.ledger
            .id_at(kind, index)
            .ok_or(LedgerError::InvalidIndex(index))
    }

    fn persist_ledger<T>(&self, value: T) -> Outcome<T> {
        let result = records::persist(self.storage.as_ref(), &self.ledger);
        self.outcome(value, result)
    }

    fn persist_categories<T>(&self, value: T) -> Outcome<T> {
        let result = records::persist_categories(self.storage.as_ref(), &self.categories);
        self.outcome(value, result)
    }

    fn outcome<T>(&self, value: T, result: Result<(), LedgerError>) -> Outcome<T> {
        let persist_warning = result.err().map(|err| {
            tracing::warn!(error = %err, "changes kept in memory only");
            err.to_string()
        });
        Outcome {
            value,
            persist_warning,
        }
    }
}
