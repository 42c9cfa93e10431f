use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::state::ShellState;

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let history = state.history();
        let entries = match args {
            [] => history.entries(),
            [count] => {
                let count = count.parse::<usize>().map_err(|_| {
                    CommandError::invalid("history", count.as_str(), "expected a number")
                })?;
                history.recent(count)
            }
            [_, extra, ..] => {
                return Err(CommandError::invalid("history", extra.as_str(), "unexpected operand"))
            }
        };

        Ok(CommandOutput::lines(
            entries.iter().map(ToString::to_string).collect(),
        ))
    }

    fn summary(&self) -> &'static str {
        "list previously executed commands"
    }

    fn usage(&self) -> &'static str {
        "history [N]"
    }
}
