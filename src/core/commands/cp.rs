use std::sync::Arc;

use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct CpCommand {
    fs: Arc<dyn FileSystem>,
}

impl CpCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for CpCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let (src, dst) = match args {
            [] => return Err(CommandError::missing("cp", "source operand")),
            [_] => return Err(CommandError::missing("cp", "destination operand")),
            [src, dst] => (state.resolve(src), state.resolve(dst)),
            [_, _, extra, ..] => {
                return Err(CommandError::invalid("cp", extra.as_str(), "unexpected operand"))
            }
        };

        let fs = self.fs.as_ref();
        if files::existing(fs, &src)?.is_dir {
            return Err(CommandError::InvalidTarget {
                path: src,
                reason: "is a directory",
            });
        }
        let target = files::landing_path(fs, &src, &dst)?;
        if target == src {
            return Err(CommandError::InvalidTarget {
                path: target,
                reason: "source and destination are the same file",
            });
        }

        fs.copy(&src, &target)
            .map_err(|e| CommandError::from_io(&target, e))?;
        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        "copy a file"
    }

    fn usage(&self) -> &'static str {
        "cp SRC DST"
    }
}
