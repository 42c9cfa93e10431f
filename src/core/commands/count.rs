use std::sync::Arc;

use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

/// Counts lines in a file, or occurrences of a piece of text in it.
#[derive(Clone)]
pub struct CountCommand {
    fs: Arc<dyn FileSystem>,
}

impl CountCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for CountCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let (operand, needle) = match args {
            [] => return Err(CommandError::missing("count", "file operand")),
            [path] => (path, None),
            [path, needle] => (path, Some(needle.as_str())),
            [_, _, extra, ..] => {
                return Err(CommandError::invalid("count", extra.as_str(), "unexpected operand"))
            }
        };

        let text = files::read_text(self.fs.as_ref(), &state.resolve(operand))?;
        let n = match needle {
            None => text.lines().count(),
            Some("") => return Err(CommandError::invalid("count", "", "empty search text")),
            Some(needle) => text.matches(needle).count(),
        };
        Ok(CommandOutput::line(n.to_string()))
    }

    fn summary(&self) -> &'static str {
        "count lines, or occurrences of TEXT, in a file"
    }

    fn usage(&self) -> &'static str {
        "count PATH [TEXT]"
    }
}
