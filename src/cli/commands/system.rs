use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .with_example("help delete"),
        CommandEntry::new(
            "darkmode",
            "Switch the colour palette",
            "darkmode [on|off]",
            cmd_darkmode,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first() {
        match context.registry.resolve(command) {
            Some(entry) => print_command(entry),
            None => context.suggest_command(command),
        }
        return Ok(());
    }

    print_overview(&context.registry);
    Ok(())
}

fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for (group, entries) in registry.grouped() {
        io::print_info(format!("{}:", group.title()));
        for entry in entries {
            io::print_info(format!("  {:<10} {}", entry.name, entry.description));
        }
    }
    io::print_info("Row numbers (#) refer to the tables printed by `list` and `search`.");
    io::print_info("Use `help <command>` for details.");
}

fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
    if let Some(example) = entry.example {
        io::print_info(format!("  Example: {}", example));
    }
}

fn cmd_darkmode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let outcome = match args {
        [] => context.manager.toggle_dark_mode(),
        [value] => match value.to_lowercase().as_str() {
            "on" | "true" => context.manager.set_dark_mode(true),
            "off" | "false" => context.manager.set_dark_mode(false),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "expected `on` or `off`, got `{}`",
                    other
                )))
            }
        },
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: darkmode [on|off]".into(),
            ))
        }
    };
    context.report_persistence(&outcome);
    context.apply_output_preferences();
    io::print_success(format!(
        "Dark mode {}.",
        if outcome.value { "on" } else { "off" }
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
