use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::state::ShellState;

/// Lists the registry; built last so it can describe every other command.
#[derive(Clone)]
pub struct HelpCommand {
    topics: Vec<(String, &'static str, &'static str)>,
}

impl HelpCommand {
    pub const SUMMARY: &'static str = "list commands or show how to use one";
    pub const USAGE: &'static str = "help [COMMAND]";

    pub fn new(mut topics: Vec<(String, &'static str, &'static str)>) -> Self {
        topics.sort_by(|a, b| a.0.cmp(&b.0));
        Self { topics }
    }
}

impl Command for HelpCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> CommandResult {
        match args {
            [] => {
                let width = self.topics.iter().map(|(name, ..)| name.len()).max().unwrap_or(0);
                Ok(CommandOutput::lines(
                    self.topics
                        .iter()
                        .map(|(name, summary, _)| format!("{:<width$}  {}", name, summary))
                        .collect(),
                ))
            }
            [name] => self
                .topics
                .iter()
                .find(|(topic, ..)| topic == name)
                .map(|(_, summary, usage)| {
                    CommandOutput::lines(vec![format!("usage: {}", usage), summary.to_string()])
                })
                .ok_or_else(|| CommandError::UnknownCommand(name.clone())),
            [_, extra, ..] => Err(CommandError::invalid("help", extra.as_str(), "unexpected operand")),
        }
    }

    fn summary(&self) -> &'static str {
        Self::SUMMARY
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }
}
