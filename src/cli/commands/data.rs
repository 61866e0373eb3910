use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::core::{confirmer, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::export::render_report;
use crate::utils::persistence::write_atomic;

use super::{summary, take_yes_flag};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write all entries to a JSON file",
            "export <path>",
            cmd_export,
        )
        .with_example("export budget-backup.json"),
        CommandEntry::new(
            "import",
            "Replace all entries with those in a JSON file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new(
            "report",
            "Write a paginated text report",
            "report <path>",
            cmd_report,
        )
        .with_example("report budget-report.txt"),
        CommandEntry::new(
            "reset",
            "Clear all incomes and expenses",
            "reset [--yes]",
            cmd_reset,
        ),
    ]
}

fn single_path(args: &[&str], usage: &str) -> Result<PathBuf, CommandError> {
    match args {
        [path] if !path.trim().is_empty() => Ok(PathBuf::from(*path)),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn remember_directory(context: &mut ShellContext, path: &Path) {
    let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return;
    };
    if context.config.last_export_dir.as_deref() == Some(parent) {
        return;
    }
    context.config.last_export_dir = Some(parent.to_path_buf());
    if let Err(err) = context.persist_config() {
        tracing::warn!(error = %err, "could not remember export directory");
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = single_path(args, "export <path>")?;
    let json = context.manager.export_json()?;
    write_atomic(&path, &json)?;
    io::print_success(format!("Exported data to {}.", path.display()));
    remember_directory(context, &path);
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = single_path(args, "import <path>")?;
    let text = fs::read_to_string(&path)?;
    let outcome = context.manager.import_json(&text)?;
    context.report_persistence(&outcome);
    let (incomes, expenses) = outcome.value;
    io::print_success(format!(
        "Imported {incomes} income(s) and {expenses} expense(s)."
    ));
    summary::print_totals(context);
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = single_path(args, "report <path>")?;
    let totals = context.manager.totals();
    let report = render_report(
        context.manager.ledger(),
        &totals,
        context.currency(),
        context.config.report_page_lines,
    );
    write_atomic(&path, &report.to_text())?;
    io::print_success(format!(
        "Report written to {} ({} page(s)).",
        path.display(),
        report.page_count()
    ));
    remember_directory(context, &path);
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (yes, rest) = take_yes_flag(args);
    if !rest.is_empty() {
        return Err(CommandError::InvalidArguments("usage: reset [--yes]".into()));
    }
    let mut confirm = confirmer(context.mode, &context.theme, yes);
    match context.manager.reset(&mut confirm)? {
        Some(outcome) => {
            context.report_persistence(&outcome);
            context.period = Default::default();
            io::print_success("All data cleared.");
            summary::print_totals(context);
        }
        None => io::print_info("Nothing cleared."),
    }
    Ok(())
}
