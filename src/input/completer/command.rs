use std::collections::BTreeSet;

use rustyline::completion::Pair;

/// Completes the first word of a line against command and alias names.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a>(commands: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            commands: commands.into_iter().map(str::to_string).collect(),
            aliases: BTreeSet::new(),
        }
    }

    pub fn update_aliases<'a>(&mut self, aliases: impl IntoIterator<Item = &'a str>) {
        self.aliases = aliases.into_iter().map(str::to_string).collect();
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let mut matches = Vec::new();
        self.add_command_matches(&mut matches, input);
        self.add_alias_matches(&mut matches, input);
        matches
    }

    fn add_command_matches(&self, matches: &mut Vec<Pair>, input: &str) {
        for cmd in self.commands.iter().filter(|cmd| cmd.starts_with(input)) {
            matches.push(Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            });
        }
    }

    fn add_alias_matches(&self, matches: &mut Vec<Pair>, input: &str) {
        for alias in self.aliases.iter().filter(|alias| alias.starts_with(input)) {
            if self.commands.contains(alias) {
                continue;
            }
            matches.push(Pair {
                display: format!("{} (alias)", alias),
                replacement: format!("{} ", alias),
            });
        }
    }
}
