use std::path::PathBuf;
use std::sync::Arc;

use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Fixed {
    Parent,
    Home,
}

/// `cd`, plus the operand-less `cd..` and `cd~` spellings.
#[derive(Clone)]
pub struct CdCommand {
    fs: Arc<dyn FileSystem>,
    fixed: Option<Fixed>,
}

impl CdCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs, fixed: None }
    }

    pub fn parent(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            fixed: Some(Fixed::Parent),
        }
    }

    pub fn home(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            fixed: Some(Fixed::Home),
        }
    }

    fn target(&self, args: &[String], state: &ShellState) -> Result<PathBuf, CommandError> {
        if let Some(fixed) = self.fixed {
            if let Some(extra) = args.first() {
                return Err(CommandError::invalid("cd", extra.as_str(), "takes no operand"));
            }
            return match fixed {
                Fixed::Parent => Ok(state.resolve("..")),
                Fixed::Home => home(state),
            };
        }

        match args {
            [] => home(state),
            [dir] => Ok(state.resolve(dir)),
            [_, extra, ..] => Err(CommandError::invalid("cd", extra.as_str(), "too many operands")),
        }
    }
}

fn home(state: &ShellState) -> Result<PathBuf, CommandError> {
    state
        .home()
        .map(PathBuf::from)
        .ok_or(CommandError::missing("cd", "home directory"))
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let target = self.target(args, state)?;

        if !files::existing(self.fs.as_ref(), &target)?.is_dir {
            return Err(CommandError::InvalidTarget {
                path: target,
                reason: "not a directory",
            });
        }
        let canonical = self
            .fs
            .canonicalize(&target)
            .map_err(|e| CommandError::from_io(&target, e))?;
        // listing proves the directory is accessible, not just present
        self.fs
            .list(&canonical)
            .map_err(|e| CommandError::from_io(&canonical, e))?;

        state.set_current_dir(canonical);
        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        match self.fixed {
            None => "change the current directory",
            Some(Fixed::Parent) => "go to the parent directory",
            Some(Fixed::Home) => "go to the home directory",
        }
    }

    fn usage(&self) -> &'static str {
        match self.fixed {
            None => "cd [DIR]",
            Some(Fixed::Parent) => "cd..",
            Some(Fixed::Home) => "cd~",
        }
    }
}
