//! Shell command table. Commands are looked up by name or alias, listed by
//! group in `help`, and matched loosely when the user mistypes one.

use std::collections::HashMap;

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Largest edit distance still offered as a "did you mean" hint.
const SUGGESTION_DISTANCE: usize = 3;

/// Headings used by the `help` overview, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandGroup {
    Entries,
    Reports,
    Categories,
    Data,
    Settings,
    Shell,
}

impl CommandGroup {
    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Entries => "Entries",
            CommandGroup::Reports => "Reports",
            CommandGroup::Categories => "Categories",
            CommandGroup::Data => "Data",
            CommandGroup::Settings => "Settings",
            CommandGroup::Shell => "Shell",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub aliases: &'static [&'static str],
    pub example: Option<&'static str>,
}

impl CommandEntry {
    pub fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            aliases: &[],
            example: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_example(mut self, example: &'static str) -> Self {
        self.example = Some(example);
        self
    }

    fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<(CommandGroup, CommandEntry)>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command under `group`. Returns `false`, leaving the table
    /// unchanged, when its name or an alias is already taken.
    pub fn register(&mut self, group: CommandGroup, entry: CommandEntry) -> bool {
        if let Some(taken) = entry.words().find(|word| self.lookup.contains_key(word)) {
            tracing::warn!(command = entry.name, word = taken, "duplicate command word ignored");
            return false;
        }
        let index = self.entries.len();
        for word in entry.words() {
            self.lookup.insert(word, index);
        }
        self.entries.push((group, entry));
        true
    }

    /// Finds a command by name or alias, ignoring case.
    pub fn resolve(&self, input: &str) -> Option<&CommandEntry> {
        let key = input.to_lowercase();
        self.lookup
            .get(key.as_str())
            .map(|index| &self.entries[*index].1)
    }

    pub fn handler(&self, input: &str) -> Option<CommandHandler> {
        self.resolve(input).map(|entry| entry.handler)
    }

    /// Commands under each non-empty group, in registration order.
    pub fn grouped(&self) -> Vec<(CommandGroup, Vec<&CommandEntry>)> {
        let mut groups: Vec<(CommandGroup, Vec<&CommandEntry>)> = Vec::new();
        for (group, entry) in &self.entries {
            match groups.iter_mut().find(|(existing, _)| existing == group) {
                Some((_, members)) => members.push(entry),
                None => groups.push((*group, vec![entry])),
            }
        }
        groups.sort_by_key(|(group, _)| *group);
        groups
    }

    /// Every name and alias, sorted, for tab completion.
    pub fn words(&self) -> Vec<&'static str> {
        let mut words: Vec<&'static str> = self.lookup.keys().copied().collect();
        words.sort_unstable();
        words
    }

    /// The command word nearest to a mistyped `input`, if any is close.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.lookup
            .keys()
            .map(|word| (levenshtein(word, &needle), *word))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min()
            .map(|(_, word)| word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandGroup::Shell,
            CommandEntry::new("exit", "Exit", "exit", noop).with_aliases(&["quit"]),
        );
        registry.register(
            CommandGroup::Entries,
            CommandEntry::new("income", "Add income", "income <source> <amount>", noop)
                .with_example("income Salary 5000"),
        );
        registry.register(
            CommandGroup::Entries,
            CommandEntry::new("expense", "Add expense", "expense <title> <amount>", noop),
        );
        registry
    }

    #[test]
    fn aliases_and_case_resolve_to_the_same_command() {
        let registry = registry();
        assert_eq!(registry.resolve("QUIT").map(|entry| entry.name), Some("exit"));
        assert_eq!(registry.resolve("Income").map(|entry| entry.name), Some("income"));
        assert!(registry.resolve("nosuch").is_none());
    }

    #[test]
    fn taken_words_are_not_registered_twice() {
        let mut registry = registry();
        let clash = CommandEntry::new("leave", "Leave", "leave", noop).with_aliases(&["quit"]);
        assert!(!registry.register(CommandGroup::Shell, clash));
        assert!(registry.resolve("leave").is_none());
        assert_eq!(registry.words(), vec!["exit", "expense", "income", "quit"]);
    }

    #[test]
    fn grouped_follows_group_order_then_registration_order() {
        let registry = registry();
        let layout: Vec<(CommandGroup, Vec<&str>)> = registry
            .grouped()
            .into_iter()
            .map(|(group, entries)| (group, entries.iter().map(|entry| entry.name).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (CommandGroup::Entries, vec!["income", "expense"]),
                (CommandGroup::Shell, vec!["exit"]),
            ]
        );
    }

    #[test]
    fn closest_only_suggests_near_misses() {
        let registry = registry();
        assert_eq!(registry.closest("incme"), Some("income"));
        assert_eq!(registry.closest("EXPENS"), Some("expense"));
        assert_eq!(registry.closest("completely-different"), None);
    }
}
