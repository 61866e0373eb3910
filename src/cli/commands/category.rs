use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage the expense category list",
        "category <list|add|rename|remove> ...",
        cmd_category,
    )
    .with_example("category rename Food Groceries")]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return list_categories(context);
    };

    match action.to_lowercase().as_str() {
        "list" => list_categories(context),
        "add" => {
            let name = args[1..].join(" ");
            let outcome = context.manager.add_category(&name)?;
            context.report_persistence(&outcome);
            io::print_success(format!("Category `{}` added.", name.trim()));
            Ok(())
        }
        "rename" => {
            let [current, new_name] = &args[1..] else {
                return Err(CommandError::InvalidArguments(
                    "usage: category rename <current> <new>".into(),
                ));
            };
            let outcome = context.manager.rename_category(current, new_name)?;
            context.report_persistence(&outcome);
            io::print_success(format!(
                "Category `{}` renamed to `{}`.",
                current,
                new_name.trim()
            ));
            Ok(())
        }
        "remove" => {
            let name = args[1..].join(" ");
            if name.trim().is_empty() {
                return Err(CommandError::InvalidArguments(
                    "usage: category remove <name>".into(),
                ));
            }
            let outcome = context.manager.remove_category(&name)?;
            context.report_persistence(&outcome);
            io::print_success(format!("Category `{}` removed.", outcome.value));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

fn list_categories(context: &ShellContext) -> CommandResult {
    output_section("Categories");
    let categories = context.manager.categories();
    if categories.is_empty() {
        io::print_info("No categories defined.");
        return Ok(());
    }
    for (index, name) in categories.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", index + 1, name));
    }
    Ok(())
}
