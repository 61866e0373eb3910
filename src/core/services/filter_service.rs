//! Filtered and searched views over the ledger.
//!
//! Every row in a view remembers the position its entry holds in the backing
//! sequence and the entry's id, so edits made from a filtered table still
//! reach the right record.

use chrono::{Datelike, NaiveDate};

use crate::core::time::parse_date;
use crate::domain::{Dated, EntryId, ExpenseEntry, Identifiable, IncomeEntry, Searchable};
use crate::errors::ValidationError;
use crate::ledger::Ledger;

const ALL: &str = "all";

/// An entry as it appears in a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRow<'a, T> {
    /// Position in the unfiltered sequence at the time the view was built.
    pub index: usize,
    pub id: EntryId,
    pub entry: &'a T,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerView<'a> {
    pub incomes: Vec<ViewRow<'a, IncomeEntry>>,
    pub expenses: Vec<ViewRow<'a, ExpenseEntry>>,
}

impl LedgerView<'_> {
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}

/// Year and month selection; `None` on an axis means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses the `"all"`/value pair used by the period selectors.
    pub fn parse(year: &str, month: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            year: parse_axis(year, "year", |v: i32| (1000..=9999).contains(&v))?,
            month: parse_axis(month, "month", |v: u32| (1..=12).contains(&v))?,
        })
    }

    pub fn is_all(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    fn matches(&self, date: Option<&str>) -> bool {
        if self.is_all() {
            return true;
        }
        let Some(parts) = date.and_then(parse_date) else {
            return false;
        };
        self.year.map_or(true, |year| parts.year == year)
            && self.month.map_or(true, |month| parts.month == month)
    }
}

fn parse_axis<T: std::str::FromStr>(
    raw: &str,
    axis: &'static str,
    valid: impl Fn(T) -> bool,
) -> Result<Option<T>, ValidationError>
where
    T: Copy,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    match trimmed.parse::<T>() {
        Ok(value) if valid(value) => Ok(Some(value)),
        _ => Err(ValidationError::InvalidPeriod {
            axis,
            value: raw.to_string(),
        }),
    }
}

pub struct FilterService;

impl FilterService {
    /// Entries whose date falls in the selected period. Both axes must match.
    pub fn by_period<'a>(ledger: &'a Ledger, filter: &PeriodFilter) -> LedgerView<'a> {
        LedgerView {
            incomes: select(&ledger.incomes, |entry| filter.matches(entry.date())),
            expenses: select(&ledger.expenses, |entry| filter.matches(entry.date())),
        }
    }

    /// Case-insensitive substring search. A blank query returns everything.
    pub fn by_search<'a>(ledger: &'a Ledger, query: &str) -> LedgerView<'a> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Self::by_period(ledger, &PeriodFilter::all());
        }
        LedgerView {
            incomes: select(&ledger.incomes, |entry| entry.matches(&needle)),
            expenses: select(&ledger.expenses, |entry| entry.matches(&needle)),
        }
    }

    /// Whether a period selection still covers the current month. Edits are
    /// only offered from filtered views for which this holds.
    pub fn is_current_period(filter: &PeriodFilter, today: NaiveDate) -> bool {
        filter.year.map_or(true, |year| year == today.year())
            && filter.month.map_or(true, |month| month == today.month())
    }
}

fn select<T: Identifiable>(entries: &[T], keep: impl Fn(&T) -> bool) -> Vec<ViewRow<'_, T>> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| keep(*entry))
        .map(|(index, entry)| ViewRow {
            index,
            id: entry.id(),
            entry,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.push_income(IncomeEntry::new("SALARY", 5000.0, "01/03/2024 09:00 AM"));
        ledger.push_income(IncomeEntry::new("Freelance", 700.0, "12/02/2024 04:00 PM"));
        ledger.push_income(IncomeEntry {
            date: None,
            ..IncomeEntry::new("Cash", 50.0, "")
        });
        ledger.push_expense(ExpenseEntry::new("Lunch", 1200.0, "Food", "02/03/2024 12:00 PM"));
        ledger.push_expense(ExpenseEntry::new("Bus", 300.0, "Transport", "09/03/2023 08:00 AM"));
        ledger
    }

    #[test]
    fn all_all_returns_everything_in_order() {
        let ledger = ledger();
        let view = FilterService::by_period(&ledger, &PeriodFilter::parse("all", "all").unwrap());
        let indices: Vec<usize> = view.incomes.iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(view.expenses.len(), 2);
        assert_eq!(view.incomes[2].id, ledger.incomes[2].id);
    }

    #[test]
    fn year_and_month_are_anded() {
        let ledger = ledger();
        let filter = PeriodFilter::parse("2024", "03").unwrap();
        let view = FilterService::by_period(&ledger, &filter);
        assert_eq!(view.incomes.len(), 1);
        assert_eq!(view.incomes[0].entry.source, "SALARY");
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.expenses[0].index, 0);

        let march_any_year = PeriodFilter::parse("all", "3").unwrap();
        let view = FilterService::by_period(&ledger, &march_any_year);
        let indices: Vec<usize> = view.expenses.iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn undated_entries_drop_out_of_period_filters() {
        let ledger = ledger();
        let view = FilterService::by_period(&ledger, &PeriodFilter::parse("2024", "all").unwrap());
        assert!(view.incomes.iter().all(|row| row.entry.date.is_some()));
    }

    #[test]
    fn invalid_axes_are_rejected() {
        assert!(PeriodFilter::parse("24", "all").is_err());
        assert!(PeriodFilter::parse("all", "13").is_err());
        assert!(PeriodFilter::parse("all", "march").is_err());
        assert_eq!(PeriodFilter::parse("ALL", "").unwrap(), PeriodFilter::all());
    }

    #[test]
    fn search_matches_category_but_not_unrelated_income() {
        let ledger = ledger();
        let view = FilterService::by_search(&ledger, "food");
        assert!(view.incomes.is_empty());
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.expenses[0].entry.title, "Lunch");
    }

    #[test]
    fn search_is_case_insensitive_and_keeps_indices() {
        let ledger = ledger();
        let view = FilterService::by_search(&ledger, "  salary ");
        assert_eq!(view.incomes.len(), 1);
        assert_eq!(view.incomes[0].index, 0);

        let view = FilterService::by_search(&ledger, "2023");
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.expenses[0].index, 1);
    }

    #[test]
    fn blank_search_is_no_filter() {
        let ledger = ledger();
        let view = FilterService::by_search(&ledger, "   ");
        assert_eq!(view.incomes.len(), 3);
        assert_eq!(view.expenses.len(), 2);
    }

    #[test]
    fn current_period_treats_all_as_wildcard() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let check = |y: &str, m: &str| {
            FilterService::is_current_period(&PeriodFilter::parse(y, m).unwrap(), today)
        };
        assert!(check("all", "all"));
        assert!(check("2024", "03"));
        assert!(check("2024", "all"));
        assert!(check("all", "3"));
        assert!(!check("2023", "03"));
        assert!(!check("2024", "02"));
    }
}
