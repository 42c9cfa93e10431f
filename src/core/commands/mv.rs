use std::sync::Arc;

use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct MvCommand {
    fs: Arc<dyn FileSystem>,
}

impl MvCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for MvCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let (src, dst) = match args {
            [] => return Err(CommandError::missing("mv", "source operand")),
            [_] => return Err(CommandError::missing("mv", "destination operand")),
            [src, dst] => (state.resolve(src), state.resolve(dst)),
            [_, _, extra, ..] => {
                return Err(CommandError::invalid("mv", extra.as_str(), "unexpected operand"))
            }
        };

        let fs = self.fs.as_ref();
        files::existing(fs, &src)?;
        let target = files::landing_path(fs, &src, &dst)?;
        if target.starts_with(&src) && target != src {
            return Err(CommandError::InvalidTarget {
                path: target,
                reason: "cannot move a directory into itself",
            });
        }
        if state.current_dir().starts_with(&src) {
            return Err(CommandError::InvalidTarget {
                path: src,
                reason: "cannot move the current directory",
            });
        }

        fs.rename(&src, &target)
            .map_err(|e| CommandError::from_io(&src, e))?;
        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        "move or rename a file"
    }

    fn usage(&self) -> &'static str {
        "mv SRC DST"
    }
}
