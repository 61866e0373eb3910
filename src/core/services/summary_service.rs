use std::collections::{BTreeMap, BTreeSet};

use crate::core::time::{month_key, parse_date, MonthKey};
use crate::domain::{Amounted, Dated, ExpenseEntry};
use crate::ledger::Ledger;

/// Grand totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// One row of the month-by-month overview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummaryRow {
    pub month: MonthKey,
    pub income_total: f64,
    pub expense_total: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of amounts; `0.0` for an empty slice.
    pub fn total<T: Amounted>(entries: &[T]) -> f64 {
        entries
            .iter()
            .map(Amounted::amount)
            .fold(0.0, |acc, amount| acc + amount)
    }

    pub fn totals(ledger: &Ledger) -> Totals {
        let income = Self::total(&ledger.incomes);
        let expense = Self::total(&ledger.expenses);
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Buckets entries by `MM/YYYY`. Entries keep their source order inside a
    /// bucket; entries without a readable date land in no bucket.
    pub fn group_by_month<T: Dated>(entries: &[T]) -> BTreeMap<MonthKey, Vec<&T>> {
        let mut groups: BTreeMap<MonthKey, Vec<&T>> = BTreeMap::new();
        for entry in entries {
            if let Some(key) = month_key(entry.date()) {
                groups.entry(key).or_default().push(entry);
            }
        }
        groups
    }

    /// Per-month income, expense, and balance in ascending `(year, month)`
    /// order. A month seen on only one side reports `0.0` for the other.
    pub fn monthly_summary(ledger: &Ledger) -> Vec<MonthlySummaryRow> {
        let mut rows: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();
        for (month, entries) in Self::group_by_month(&ledger.incomes) {
            rows.entry(month).or_default().0 += entries.iter().map(|e| e.amount).sum::<f64>();
        }
        for (month, entries) in Self::group_by_month(&ledger.expenses) {
            rows.entry(month).or_default().1 += entries.iter().map(|e| e.amount).sum::<f64>();
        }
        rows.into_iter()
            .map(|(month, (income_total, expense_total))| MonthlySummaryRow {
                month,
                income_total,
                expense_total,
                balance: income_total - expense_total,
            })
            .collect()
    }

    /// Expense totals per category, in the order each category first appears.
    pub fn category_breakdown(expenses: &[ExpenseEntry]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in expenses {
            match totals.iter_mut().find(|t| t.category == expense.category) {
                Some(existing) => existing.total += expense.amount,
                None => totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                }),
            }
        }
        totals
    }

    /// Distinct years present in entry dates, newest first.
    pub fn available_years(ledger: &Ledger) -> Vec<i32> {
        let incomes = ledger.incomes.iter().filter_map(|e| e.date());
        let expenses = ledger.expenses.iter().filter_map(|e| e.date());
        let years: BTreeSet<i32> = incomes
            .chain(expenses)
            .filter_map(parse_date)
            .map(|parts| parts.year)
            .collect();
        years.into_iter().rev().collect()
    }
}
