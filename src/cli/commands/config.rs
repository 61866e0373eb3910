use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::export::DEFAULT_PAGE_LINES;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change display preferences",
        "config [show|set <currency|pagelines> <value>]",
        cmd_config,
    )
    .with_example("config set currency $")]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <currency|pagelines> <value>".into(),
                ));
            }
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!("  Currency   : {}", config.currency_symbol));
    io::print_info(format!("  Page lines : {}", config.report_page_lines));
    io::print_info(format!(
        "  Dark mode  : {}",
        if context.manager.dark_mode() { "on" } else { "off" }
    ));
    if let Some(dir) = &config.last_export_dir {
        io::print_info(format!("  Last export: {}", dir.display()));
    }
    io::print_info(format!("  File       : {}", context.config_manager.path().display()));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    if value.is_empty() {
        return Err(CommandError::InvalidArguments("value must not be empty".into()));
    }
    match key.to_lowercase().as_str() {
        "currency" => context.config.currency_symbol = value.to_string(),
        "pagelines" | "page_lines" => {
            let lines = match value {
                "default" => DEFAULT_PAGE_LINES,
                raw => raw.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`{raw}` is not a positive number of lines"
                    ))
                })?,
            };
            context.config.report_page_lines = lines;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }
    context.persist_config()?;
    io::print_success(format!("Updated {} to {}.", key.to_lowercase(), value));
    Ok(())
}
