use std::sync::Arc;

use super::files;
use super::{Command, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct CatCommand {
    fs: Arc<dyn FileSystem>,
}

impl CatCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for CatCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let targets = files::operands(state, args, "cat", "file operand")?;
        let read = files::read_each(self.fs.as_ref(), targets)?;
        let lines = read
            .texts
            .iter()
            .flat_map(|(_, text)| text.lines().map(str::to_string))
            .collect();
        Ok(CommandOutput::lines(lines).with_errors(read.errors))
    }

    fn summary(&self) -> &'static str {
        "print file contents"
    }

    fn usage(&self) -> &'static str {
        "cat PATH..."
    }
}
