//! Core CLI dispatch, errors, and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    core::{
        ledger_manager::{LedgerManager, Outcome},
        services::EditState,
        time::SystemClock,
    },
    domain::EntryKind,
    errors::LedgerError,
    storage::{JsonStorage, KeyValueStore, MemoryStorage},
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Errors that end the shell.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Errors reported for a single command; the shell keeps running.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        // Startup warnings print before the stored dark-mode flag is known.
        output::set_preferences(OutputPreferences {
            dark_mode: false,
            plain_mode: mode == CliMode::Script,
        });

        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                cli_io::print_warning(format!("Configuration unreadable, using defaults: {err}"));
                Default::default()
            }
        };

        let storage: Box<dyn KeyValueStore> = match JsonStorage::new_default() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                cli_io::print_warning(format!(
                    "{err}. Changes will only last for this session."
                ));
                Box::new(MemoryStorage::new())
            }
        };
        let (manager, warnings) = LedgerManager::open(storage, Box::new(SystemClock));

        let context = ShellContext {
            mode,
            registry,
            manager,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            period: Default::default(),
            running: true,
        };
        context.apply_output_preferences();
        for warning in warnings {
            cli_io::print_warning(warning);
        }
        Ok(context)
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            dark_mode: self.manager.dark_mode(),
            plain_mode: self.mode == CliMode::Script,
        });
    }

    pub(crate) fn command_words(&self) -> Vec<&'static str> {
        self.registry.words()
    }

    /// `budget> `, or `budget (editing income)> ` while a form holds an entry.
    pub(crate) fn prompt(&self) -> String {
        let editing: Vec<&str> = [EntryKind::Income, EntryKind::Expense]
            .into_iter()
            .filter(|kind| self.manager.edit_state(*kind) != EditState::Idle)
            .map(|kind| kind.label())
            .collect();
        if editing.is_empty() {
            "budget> ".to_string()
        } else {
            format!("budget (editing {})> ", editing.join(", "))
        }
    }

    pub(crate) fn print_balance(&self) {
        commands::summary::print_totals(self);
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> bool {
        if self.mode == CliMode::Script {
            return true;
        }
        cli_io::confirm_action(&self.theme, "Exit shell?")
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other),
        }
    }

    /// Surfaces a failed write without interrupting the session.
    pub(crate) fn report_persistence<T>(&self, outcome: &Outcome<T>) {
        if let Some(reason) = &outcome.persist_warning {
            cli_io::print_warning(format!(
                "Could not save changes ({reason}). They will last until the shell exits."
            ));
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}

/// Asks before an irreversible action. Script mode never prompts: only an
/// explicit `--yes` confirms there.
pub(crate) fn confirmer(
    mode: CliMode,
    theme: &ColorfulTheme,
    assume_yes: bool,
) -> impl FnMut(&str) -> bool + '_ {
    move |prompt: &str| {
        if assume_yes {
            return true;
        }
        match mode {
            CliMode::Interactive => cli_io::confirm_action(theme, prompt),
            CliMode::Script => {
                cli_io::print_warning(format!("{prompt} Re-run with --yes to confirm."));
                false
            }
        }
    }
}
