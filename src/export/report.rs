//! Paginated plain-text report of the ledger.

use crate::core::services::Totals;
use crate::ledger::Ledger;

pub const DEFAULT_PAGE_LINES: usize = 40;
const MIN_PAGE_LINES: usize = 8;
const PAGE_SEPARATOR: &str = "\u{c}\n";
const REPORT_TITLE: &str = "Budget Report";

/// A rendered report, one vector of lines per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pages: Vec<Vec<String>>,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with form feeds, ready to write to a file.
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = page.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    }
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, amount)
}

/// The three summary lines shown above the tables.
pub fn summary_lines(totals: &Totals, currency: &str) -> [String; 3] {
    [
        format!("Total Income: {}", format_amount(totals.income, currency)),
        format!("Total Expenses: {}", format_amount(totals.expense, currency)),
        format!(
            "Remaining Balance: {}",
            format_amount(totals.balance, currency)
        ),
    ]
}

struct PageBuilder {
    limit: usize,
    pages: Vec<Vec<String>>,
}

impl PageBuilder {
    fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(MIN_PAGE_LINES),
            pages: vec![Vec::new()],
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        let full = self.pages.last().map_or(true, |page| page.len() >= self.limit);
        if full {
            self.pages.push(Vec::new());
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(text.into());
        }
    }

    fn finish(self) -> Report {
        Report { pages: self.pages }
    }
}

/// Renders title, summary, and both history tables in ledger order, starting
/// a new page whenever the current one reaches `page_lines`.
pub fn render_report(ledger: &Ledger, totals: &Totals, currency: &str, page_lines: usize) -> Report {
    let mut builder = PageBuilder::new(page_lines);
    builder.line(REPORT_TITLE);
    builder.line("");
    for line in summary_lines(totals, currency) {
        builder.line(line);
    }

    builder.line("");
    builder.line("Income History");
    builder.line(format!("{:<24} {:>14} {}", "Source", "Amount", "Date"));
    for income in &ledger.incomes {
        builder.line(format!(
            "{:<24} {:>14} {}",
            income.source,
            format_amount(income.amount, currency),
            income.date.as_deref().unwrap_or("-")
        ));
    }

    builder.line("");
    builder.line("Expense History");
    builder.line(format!(
        "{:<24} {:>14} {:<16} {}",
        "Title", "Amount", "Category", "Date"
    ));
    for expense in &ledger.expenses {
        builder.line(format!(
            "{:<24} {:>14} {:<16} {}",
            expense.title,
            format_amount(expense.amount, currency),
            expense.category,
            expense.date.as_deref().unwrap_or("-")
        ));
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::domain::{ExpenseEntry, IncomeEntry};

    #[test]
    fn summary_lines_use_two_decimals() {
        let totals = Totals {
            income: 5000.0,
            expense: 1500.0,
            balance: 3500.0,
        };
        assert_eq!(
            summary_lines(&totals, "₦"),
            [
                "Total Income: ₦5000.00".to_string(),
                "Total Expenses: ₦1500.00".to_string(),
                "Remaining Balance: ₦3500.00".to_string(),
            ]
        );
    }

    #[test]
    fn small_ledger_fits_on_one_page() {
        let mut ledger = Ledger::default();
        ledger.push_income(IncomeEntry::new("Salary", 5000.0, "01/03/2024 09:00 AM"));
        ledger.push_expense(ExpenseEntry::new("Lunch", 1200.0, "Food", "02/03/2024 12:00 PM"));
        let totals = SummaryService::totals(&ledger);

        let report = render_report(&ledger, &totals, "$", DEFAULT_PAGE_LINES);
        assert_eq!(report.page_count(), 1);
        let page = &report.pages[0];
        assert_eq!(page[0], "Budget Report");
        assert!(page.iter().any(|line| line.starts_with("Salary") && line.contains("$5000.00")));
        assert!(page.iter().any(|line| line.contains("Food") && line.contains("02/03/2024")));
        assert!(!report.to_text().contains('\u{c}'));
    }

    #[test]
    fn long_histories_paginate() {
        let mut ledger = Ledger::default();
        for i in 0..50 {
            ledger.push_expense(ExpenseEntry::new(format!("Item {i}"), 1.0, "Other", "01/01/2024 10:00 AM"));
        }
        let totals = SummaryService::totals(&ledger);
        let report = render_report(&ledger, &totals, "$", 20);

        assert!(report.pages.iter().all(|page| page.len() <= 20));
        let total_lines: usize = report.pages.iter().map(Vec::len).sum();
        // title, blank, 3 summary, blank, 2 income headers, blank, 2 expense headers
        assert_eq!(total_lines, 11 + 50);
        assert_eq!(report.page_count(), 4);
        assert_eq!(report.to_text().matches('\u{c}').count(), 3);
    }
}
