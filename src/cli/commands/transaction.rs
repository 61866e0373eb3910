use crate::cli::core::{confirmer, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::ledger_manager::EditDraft;
use crate::core::services::{EditState, ExpenseForm, IncomeForm, Submission};
use crate::domain::EntryKind;

use super::{ensure_editable, parse_kind, parse_row_number, summary, take_yes_flag};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Add an income, or save the one being edited",
            "income <source> <amount>",
            cmd_income,
        )
        .with_example("income Salary 5000"),
        CommandEntry::new(
            "expense",
            "Add an expense, or save the one being edited",
            "expense <title> <amount> [category]",
            cmd_expense,
        )
        .with_example("expense \"Bus fare\" 300 Transport"),
        CommandEntry::new(
            "edit",
            "Load an entry into its form for editing",
            "edit <income|expense> <#>",
            cmd_edit,
        )
        .with_example("edit expense 2"),
        CommandEntry::new(
            "cancel",
            "Abandon the edit in progress",
            "cancel <income|expense>",
            cmd_cancel,
        ),
        CommandEntry::new(
            "delete",
            "Delete an entry",
            "delete <income|expense> <#> [--yes]",
            cmd_delete,
        )
        .with_example("delete income 1 --yes"),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: income <source> <amount>".into(),
        ));
    }
    ensure_editable(context)?;
    let form = IncomeForm {
        source: args[0].to_string(),
        amount: args[1].to_string(),
    };
    let outcome = context.manager.submit_income(&form)?;
    context.report_persistence(&outcome);
    report_submission(EntryKind::Income, outcome.value);
    summary::print_totals(context);
    Ok(())
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(2..=3).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(
            "usage: expense <title> <amount> [category]".into(),
        ));
    }
    ensure_editable(context)?;
    let category = args.get(2).copied().unwrap_or_default();
    if !category.trim().is_empty() && !context.manager.categories().contains(category) {
        io::print_hint(format!(
            "`{}` is not in the category list. Use `category add` to keep it for later.",
            category.trim()
        ));
    }
    let form = ExpenseForm {
        title: args[0].to_string(),
        amount: args[1].to_string(),
        category: category.to_string(),
    };
    let outcome = context.manager.submit_expense(&form)?;
    context.report_persistence(&outcome);
    report_submission(EntryKind::Expense, outcome.value);
    summary::print_totals(context);
    Ok(())
}

fn report_submission(kind: EntryKind, submission: Submission) {
    let noun = match kind {
        EntryKind::Income => "Income",
        EntryKind::Expense => "Expense",
    };
    match submission {
        Submission::Created(_) => io::print_success(format!("{noun} added.")),
        Submission::Updated(_) => io::print_success(format!("{noun} updated.")),
    }
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: edit <income|expense> <#>".into(),
        ));
    }
    let kind = parse_kind(args[0])?;
    let index = parse_row_number(args[1])?;
    ensure_editable(context)?;

    match context.manager.begin_edit_at(kind, index)? {
        EditDraft::Income(form) => {
            io::print_info(format!(
                "Editing income #{}: {} ({})",
                index + 1,
                form.source,
                form.amount
            ));
            io::print_hint("Run `income <source> <amount>` to save, or `cancel income`.");
        }
        EditDraft::Expense(form) => {
            io::print_info(format!(
                "Editing expense #{}: {} ({}, {})",
                index + 1,
                form.title,
                form.amount,
                form.category
            ));
            io::print_hint("Run `expense <title> <amount> [category]` to save, or `cancel expense`.");
        }
    }
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: cancel <income|expense>".into(),
        ));
    };
    let kind = parse_kind(raw)?;
    if context.manager.edit_state(kind) == EditState::Idle {
        io::print_info(format!("No {kind} edit in progress."));
        return Ok(());
    }
    context.manager.cancel_edit(kind);
    io::print_info(format!("Stopped editing the {kind} entry."));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (yes, rest) = take_yes_flag(args);
    if rest.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: delete <income|expense> <#> [--yes]".into(),
        ));
    }
    let kind = parse_kind(rest[0])?;
    let index = parse_row_number(rest[1])?;
    ensure_editable(context)?;

    let mut confirm = confirmer(context.mode, &context.theme, yes);
    let removed = context.manager.remove_at(kind, index, &mut confirm)?;
    match removed {
        Some(outcome) => {
            context.report_persistence(&outcome);
            io::print_success(format!("Deleted {kind} #{}.", outcome.value + 1));
            summary::print_totals(context);
        }
        None => io::print_info("Nothing deleted."),
    }
    Ok(())
}
