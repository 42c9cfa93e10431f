use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("mkdir").switches("p");

#[derive(Clone)]
pub struct MkdirCommand {
    fs: Arc<dyn FileSystem>,
}

impl MkdirCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for MkdirCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let parents = parsed.has('p');

        for (_, path) in files::operands(state, &parsed.operands, "mkdir", "directory operand")? {
            if files::stat(self.fs.as_ref(), &path)?.exists {
                return Err(CommandError::AlreadyExists(path));
            }
            self.fs
                .mkdir(&path, parents)
                .map_err(|e| CommandError::from_io(&path, e))?;
        }
        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        "create directories"
    }

    fn usage(&self) -> &'static str {
        "mkdir [-p] DIR..."
    }
}
