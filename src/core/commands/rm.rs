use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("rm").switches("rf");

#[derive(Clone)]
pub struct RmCommand {
    fs: Arc<dyn FileSystem>,
}

impl RmCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for RmCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let (recursive, force) = (parsed.has('r'), parsed.has('f'));

        for (_, path) in files::operands(state, &parsed.operands, "rm", "file operand")? {
            let stat = files::stat(self.fs.as_ref(), &path)?;
            if !stat.exists {
                if force {
                    continue;
                }
                return Err(CommandError::NotFound(path));
            }
            if stat.is_dir && !recursive {
                return Err(CommandError::InvalidTarget {
                    path,
                    reason: "is a directory (use -r)",
                });
            }
            if state.current_dir().starts_with(&path) {
                return Err(CommandError::InvalidTarget {
                    path,
                    reason: "refusing to remove the current directory or its parent",
                });
            }

            self.fs
                .remove(&path, recursive)
                .map_err(|e| CommandError::from_io(&path, e))?;
        }

        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        "remove files or directories"
    }

    fn usage(&self) -> &'static str {
        "rm [-r] [-f] PATH..."
    }
}
