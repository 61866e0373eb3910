use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{LedgerView, PeriodFilter};
use crate::export::{format_amount, summary_lines};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show entries, optionally for one year and month",
            "list [year|all] [month|all]",
            cmd_list,
        )
        .with_example("list 2024 03"),
        CommandEntry::new(
            "search",
            "Find entries by source, title, or category",
            "search <text>",
            cmd_search,
        )
        .with_example("search food"),
        CommandEntry::new("summary", "Show overall totals", "summary", cmd_summary),
        CommandEntry::new(
            "monthly",
            "Show income, expenses, and balance per month",
            "monthly",
            cmd_monthly,
        ),
        CommandEntry::new(
            "breakdown",
            "Show expense totals per category",
            "breakdown",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "years",
            "List the years that have entries",
            "years",
            cmd_years,
        ),
    ]
}

/// Prints the three summary lines for the whole ledger.
pub(crate) fn print_totals(context: &ShellContext) {
    let totals = context.manager.totals();
    for line in summary_lines(&totals, context.currency()) {
        output::line(line);
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = match args {
        [] => PeriodFilter::all(),
        [year] => PeriodFilter::parse(year, "all").map_err(invalid)?,
        [year, month] => PeriodFilter::parse(year, month).map_err(invalid)?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: list [year|all] [month|all]".into(),
            ))
        }
    };
    context.period = filter;

    let view = context.manager.view_by_period(&filter);
    render_view(context, &view, "No entries for this period.");
    if !context.manager.is_current_period(&filter) {
        io::print_hint("Viewing a past period. Entries here are read-only.");
    }
    Ok(())
}

fn invalid(err: impl std::fmt::Display) -> CommandError {
    CommandError::InvalidArguments(err.to_string())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let view = context.manager.view_by_search(&query);
    render_view(context, &view, "No entries match your search.");
    Ok(())
}

fn render_view(context: &ShellContext, view: &LedgerView<'_>, empty_message: &str) {
    if view.is_empty() {
        io::print_info(empty_message);
        return;
    }
    let currency = context.currency();

    output_section("Income History");
    let mut incomes = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Source").max(28),
        TableColumn::right("Amount"),
        TableColumn::left("Date"),
    ]);
    for row in &view.incomes {
        incomes.push(vec![
            (row.index + 1).to_string(),
            row.entry.source.clone(),
            format_amount(row.entry.amount, currency),
            row.entry.date.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    output::line(incomes.render());

    output_section("Expense History");
    let mut expenses = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Title").max(28),
        TableColumn::right("Amount"),
        TableColumn::left("Category").max(18),
        TableColumn::left("Date"),
    ]);
    for row in &view.expenses {
        expenses.push(vec![
            (row.index + 1).to_string(),
            row.entry.title.clone(),
            format_amount(row.entry.amount, currency),
            row.entry.category.clone(),
            row.entry.date.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    output::line(expenses.render());
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Summary");
    print_totals(context);
    Ok(())
}

fn cmd_monthly(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.manager.monthly_summary();
    if rows.is_empty() {
        io::print_info("No dated entries yet.");
        return Ok(());
    }
    let currency = context.currency();
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Balance"),
    ]);
    for row in rows {
        table.push(vec![
            row.month.to_string(),
            format_amount(row.income_total, currency),
            format_amount(row.expense_total, currency),
            format_amount(row.balance, currency),
        ]);
    }
    output_section("Monthly Summary");
    output::line(table.render());
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.manager.category_breakdown();
    if rows.is_empty() {
        io::print_info("No expenses yet.");
        return Ok(());
    }
    let currency = context.currency();
    let mut table = Table::new(vec![
        TableColumn::left("Category").max(24),
        TableColumn::right("Total"),
    ]);
    for row in rows {
        table.push(vec![row.category, format_amount(row.total, currency)]);
    }
    output_section("Expenses by Category");
    output::line(table.render());
    Ok(())
}

fn cmd_years(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let years = context.manager.available_years();
    if years.is_empty() {
        io::print_info("No dated entries yet.");
        return Ok(());
    }
    let listed: Vec<String> = years.iter().map(i32::to_string).collect();
    io::print_info(format!("Years with entries: {}", listed.join(", ")));
    Ok(())
}
