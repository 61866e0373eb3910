//! Validation and the add/edit/delete rules for ledger entries.

use crate::core::services::ServiceResult;
use crate::core::time::{format_timestamp, Clock};
use crate::domain::{EntryId, EntryKind, ExpenseEntry, IncomeEntry};
use crate::errors::{LedgerError, ValidationError};
use crate::ledger::Ledger;

/// Category recorded when an expense is submitted without one.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Edit mode of one entry form. Income and expense forms are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EntryId),
}

/// Raw income form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeForm {
    pub source: String,
    pub amount: String,
}

/// Raw expense form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created(EntryId),
    Updated(EntryId),
}

impl Submission {
    pub fn id(&self) -> EntryId {
        match self {
            Submission::Created(id) | Submission::Updated(id) => *id,
        }
    }
}

/// Provides validated create/update/delete helpers for ledger entries.
pub struct TransactionService;

impl TransactionService {
    /// Accepts finite amounts strictly greater than zero.
    pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
        match raw.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
            _ => Err(ValidationError::InvalidAmount(raw.trim().to_string())),
        }
    }

    fn required_text(raw: &str, field: &'static str) -> Result<String, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(ValidationError::EmptyText { field })
        } else {
            Ok(trimmed.to_string())
        }
    }

    pub fn validate_income(form: &IncomeForm) -> Result<(String, f64), ValidationError> {
        let source = Self::required_text(&form.source, "source")?;
        let amount = Self::parse_amount(&form.amount)?;
        Ok((source, amount))
    }

    pub fn validate_expense(form: &ExpenseForm) -> Result<(String, f64, String), ValidationError> {
        let title = Self::required_text(&form.title, "title")?;
        let amount = Self::parse_amount(&form.amount)?;
        let category = match form.category.trim() {
            "" => FALLBACK_CATEGORY.to_string(),
            other => other.to_string(),
        };
        Ok((title, amount, category))
    }

    /// Appends a fresh income entry when idle, or overwrites the entry being
    /// edited in place with a freshly stamped one. On success the state
    /// returns to `Idle`; on validation failure nothing changes.
    pub fn submit_income(
        ledger: &mut Ledger,
        state: &mut EditState,
        form: &IncomeForm,
        clock: &dyn Clock,
    ) -> ServiceResult<Submission> {
        let (source, amount) = Self::validate_income(form)?;
        let mut entry = IncomeEntry::new(source, amount, format_timestamp(clock.now()));
        match *state {
            EditState::Idle => Ok(Submission::Created(ledger.push_income(entry))),
            EditState::Editing(id) => {
                entry.id = id;
                if !ledger.replace_income(entry) {
                    *state = EditState::Idle;
                    return Err(LedgerError::EntryNotFound(id));
                }
                *state = EditState::Idle;
                Ok(Submission::Updated(id))
            }
        }
    }

    pub fn submit_expense(
        ledger: &mut Ledger,
        state: &mut EditState,
        form: &ExpenseForm,
        clock: &dyn Clock,
    ) -> ServiceResult<Submission> {
        let (title, amount, category) = Self::validate_expense(form)?;
        let mut entry = ExpenseEntry::new(title, amount, category, format_timestamp(clock.now()));
        match *state {
            EditState::Idle => Ok(Submission::Created(ledger.push_expense(entry))),
            EditState::Editing(id) => {
                entry.id = id;
                if !ledger.replace_expense(entry) {
                    *state = EditState::Idle;
                    return Err(LedgerError::EntryNotFound(id));
                }
                *state = EditState::Idle;
                Ok(Submission::Updated(id))
            }
        }
    }

    /// Form contents for editing an existing income entry.
    pub fn income_form(ledger: &Ledger, id: EntryId) -> ServiceResult<IncomeForm> {
        let entry = ledger.income(id).ok_or(LedgerError::EntryNotFound(id))?;
        Ok(IncomeForm {
            source: entry.source.clone(),
            amount: entry.amount.to_string(),
        })
    }

    pub fn expense_form(ledger: &Ledger, id: EntryId) -> ServiceResult<ExpenseForm> {
        let entry = ledger.expense(id).ok_or(LedgerError::EntryNotFound(id))?;
        Ok(ExpenseForm {
            title: entry.title.clone(),
            amount: entry.amount.to_string(),
            category: entry.category.clone(),
        })
    }

    /// Removes an entry and returns the position it held.
    pub fn remove(ledger: &mut Ledger, kind: EntryKind, id: EntryId) -> ServiceResult<usize> {
        let index = ledger
            .position_of(kind, id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        ledger.remove(kind, id);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 5, 17)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        )
    }

    fn income(source: &str, amount: &str) -> IncomeForm {
        IncomeForm {
            source: source.into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn idle_submit_appends_stamped_entry() {
        let mut ledger = Ledger::default();
        let mut state = EditState::Idle;
        let result =
            TransactionService::submit_income(&mut ledger, &mut state, &income(" Salary ", "5000"), &clock())
                .unwrap();

        assert!(matches!(result, Submission::Created(_)));
        assert_eq!(ledger.incomes.len(), 1);
        assert_eq!(ledger.incomes[0].source, "Salary");
        assert_eq!(ledger.incomes[0].amount, 5000.0);
        assert_eq!(ledger.incomes[0].date.as_deref(), Some("17/05/2024 02:05 PM"));
    }

    #[test]
    fn editing_submit_overwrites_in_place_and_returns_to_idle() {
        let mut ledger = Ledger::default();
        let mut state = EditState::Idle;
        for source in ["A", "B", "C"] {
            TransactionService::submit_income(&mut ledger, &mut state, &income(source, "1"), &clock())
                .unwrap();
        }
        let target = ledger.incomes[1].id;
        state = EditState::Editing(target);

        let result =
            TransactionService::submit_income(&mut ledger, &mut state, &income("B2", "2.5"), &clock())
                .unwrap();
        assert_eq!(result, Submission::Updated(target));
        assert_eq!(state, EditState::Idle);
        assert_eq!(ledger.incomes.len(), 3);
        assert_eq!(ledger.incomes[1].source, "B2");
        assert_eq!(ledger.incomes[1].id, target);
    }

    #[test]
    fn invalid_submissions_change_nothing() {
        let mut ledger = Ledger::default();
        let mut state = EditState::Idle;
        for (source, amount) in [("", "10"), ("  ", "10"), ("X", "abc"), ("X", "0"), ("X", "-4"), ("X", "NaN"), ("X", "inf")] {
            let err = TransactionService::submit_income(&mut ledger, &mut state, &income(source, amount), &clock())
                .expect_err("submission must be rejected");
            assert!(matches!(err, LedgerError::Validation(_)), "unexpected error: {err:?}");
        }
        assert!(ledger.incomes.is_empty());
    }

    #[test]
    fn expense_without_category_falls_back() {
        let mut ledger = Ledger::default();
        let mut state = EditState::Idle;
        let form = ExpenseForm {
            title: "Lunch".into(),
            amount: "1200".into(),
            category: "  ".into(),
        };
        TransactionService::submit_expense(&mut ledger, &mut state, &form, &clock()).unwrap();
        assert_eq!(ledger.expenses[0].category, FALLBACK_CATEGORY);
    }

    #[test]
    fn editing_a_vanished_entry_reports_not_found() {
        let mut ledger = Ledger::default();
        let ghost = EntryId::new();
        let mut state = EditState::Editing(ghost);
        let err =
            TransactionService::submit_income(&mut ledger, &mut state, &income("A", "1"), &clock())
                .expect_err("missing entry");
        assert!(matches!(err, LedgerError::EntryNotFound(id) if id == ghost));
        assert_eq!(state, EditState::Idle);
        assert!(ledger.incomes.is_empty());
    }

    #[test]
    fn remove_reports_previous_position() {
        let mut ledger = Ledger::default();
        let mut state = EditState::Idle;
        for source in ["A", "B"] {
            TransactionService::submit_income(&mut ledger, &mut state, &income(source, "1"), &clock())
                .unwrap();
        }
        let id = ledger.incomes[1].id;
        assert_eq!(TransactionService::remove(&mut ledger, EntryKind::Income, id).unwrap(), 1);
        assert!(TransactionService::remove(&mut ledger, EntryKind::Income, id).is_err());
    }
}
