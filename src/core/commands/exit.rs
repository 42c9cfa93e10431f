use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::state::ShellState;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> CommandResult {
        if let Some(extra) = args.first() {
            return Err(CommandError::invalid("exit", extra.as_str(), "takes no operand"));
        }
        Ok(CommandOutput::none().and_exit())
    }

    fn summary(&self) -> &'static str {
        "leave the shell"
    }

    fn usage(&self) -> &'static str {
        "exit"
    }
}
