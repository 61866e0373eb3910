//! Shell command definitions, grouped by concern.

pub mod category;
pub mod config;
pub mod data;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, ShellContext};
use crate::cli::registry::{CommandGroup, CommandRegistry};
use crate::domain::EntryKind;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        (CommandGroup::Shell, system::definitions()),
        (CommandGroup::Entries, transaction::definitions()),
        (CommandGroup::Reports, summary::definitions()),
        (CommandGroup::Categories, category::definitions()),
        (CommandGroup::Data, data::definitions()),
        (CommandGroup::Settings, config::definitions()),
    ];
    for (group, entries) in groups {
        for entry in entries {
            registry.register(group, entry);
        }
    }
}

pub(crate) const YES_FLAG: &str = "--yes";

/// Splits `--yes`/`-y` out of the argument list.
pub(crate) fn take_yes_flag<'a>(args: &[&'a str]) -> (bool, Vec<&'a str>) {
    let mut yes = false;
    let mut rest = Vec::with_capacity(args.len());
    for arg in args {
        if *arg == YES_FLAG || *arg == "-y" {
            yes = true;
        } else {
            rest.push(*arg);
        }
    }
    (yes, rest)
}

pub(crate) fn parse_kind(raw: &str) -> Result<EntryKind, CommandError> {
    raw.parse::<EntryKind>()
        .map_err(|_| CommandError::InvalidArguments("entry kind must be `income` or `expense`".into()))
}

/// Converts the 1-based row number shown in tables into a sequence index.
pub(crate) fn parse_row_number(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid row number"
        ))),
    }
}

/// Entries can only be changed while the selected period includes the
/// current month.
pub(crate) fn ensure_editable(context: &ShellContext) -> Result<(), CommandError> {
    if context.manager.is_current_period(&context.period) {
        Ok(())
    } else {
        Err(CommandError::Message(
            "Entries from past periods are read-only. Run `list` to return to the current view."
                .into(),
        ))
    }
}
