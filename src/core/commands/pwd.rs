use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::state::ShellState;

#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        if let Some(extra) = args.first() {
            return Err(CommandError::invalid("pwd", extra.as_str(), "takes no arguments"));
        }
        Ok(CommandOutput::line(
            state.current_dir().to_string_lossy().into_owned(),
        ))
    }

    fn summary(&self) -> &'static str {
        "print the current directory"
    }

    fn usage(&self) -> &'static str {
        "pwd"
    }
}
