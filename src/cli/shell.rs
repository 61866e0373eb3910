use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io::{print_info, print_warning};
use crate::core::utils::PathResolver;

const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";
const COMMENT_PREFIX: char = '#';

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn history_path() -> PathBuf {
    PathResolver::history_file_in(&PathResolver::resolve_base(None))
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_words())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = history_path();
    if let Err(err) = editor.load_history(&history) {
        tracing::debug!(error = %err, path = %history.display(), "no shell history loaded");
    }

    print_info("Type `help` to list commands.");
    context.print_balance();

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit() {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        tracing::warn!(error = %err, "could not save shell history");
    }
    Ok(())
}

/// Reads commands from stdin, one per line. Blank lines and lines starting
/// with `#` are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for (number, line) in stdin.lock().lines().enumerate() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        tracing::debug!(line = number + 1, command = trimmed, "script command");
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            print_warning(format!("Could not read command: {err}"));
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

const KIND_WORDS: &[&str] = &["income", "expense"];

/// Words offered for the argument at `position` (1-based) of `command`.
fn argument_words(command: &str, position: usize) -> &'static [&'static str] {
    match (command, position) {
        ("edit" | "delete" | "cancel", 1) => KIND_WORDS,
        ("delete", 3) | ("reset", 1) => &["--yes"],
        ("category", 1) => &["list", "add", "rename", "remove"],
        ("config", 1) => &["show", "set"],
        ("config", 2) => &["currency", "pagelines"],
        ("darkmode", 1) => &["on", "off"],
        ("list", 1) | ("list", 2) => &["all"],
        _ => &[],
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, words_before: &[&str], needle: &str) -> Vec<Pair> {
        let pool: Vec<&str> = match words_before.split_first() {
            None => self.commands.iter().map(String::as_str).collect(),
            Some((command, args)) => {
                argument_words(&command.to_ascii_lowercase(), args.len() + 1).to_vec()
            }
        };
        pool.into_iter()
            .filter(|word| word.starts_with(needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words_before: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();
        Ok((start, self.candidates(&words_before, &needle)))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec!["income", "expense", "edit", "exit", "delete"])
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"expense "Bus fare" 300 Transport"#).unwrap();
        assert_eq!(tokens, vec!["expense", "Bus fare", "300", "Transport"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line(r#"income "Salary 5000"#).is_err());
    }

    #[test]
    fn command_words_complete_by_prefix() {
        let pairs = helper().candidates(&[], "e");
        assert_eq!(replacements(pairs), vec!["edit", "exit", "expense"]);
    }

    #[test]
    fn entry_kind_completes_after_edit_and_delete() {
        assert_eq!(replacements(helper().candidates(&["edit"], "ex")), vec!["expense"]);
        assert_eq!(
            replacements(helper().candidates(&["DELETE", "income", "2"], "")),
            vec!["--yes"]
        );
        assert!(helper().candidates(&["income"], "").is_empty());
    }
}
