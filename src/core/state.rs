use std::path::{Path, PathBuf};

use crate::input::History;
use crate::path::PathExpander;

/// Per-session interpreter context handed to every command.
///
/// The working directory lives here instead of in the process so commands
/// resolve paths against it explicitly. It is only changed through
/// [`ShellState::set_current_dir`], which `cd` calls after checking the
/// target is an existing directory.
#[derive(Debug, Clone)]
pub struct ShellState {
    current_dir: PathBuf,
    history: History,
    expander: PathExpander,
}

impl ShellState {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self::with_expander(current_dir, PathExpander::new())
    }

    pub fn with_expander(current_dir: impl Into<PathBuf>, expander: PathExpander) -> Self {
        Self {
            current_dir: current_dir.into(),
            history: History::new(),
            expander,
        }
    }

    /// Starts the session from an existing log instead of an empty one.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub(crate) fn set_current_dir(&mut self, dir: PathBuf) {
        tracing::debug!(dir = %dir.display(), "working directory changed");
        self.current_dir = dir;
    }

    /// Absolute form of a path operand as typed by the user.
    pub fn resolve(&self, operand: &str) -> PathBuf {
        self.expander.expand(&self.current_dir, operand)
    }

    pub fn home(&self) -> Option<&Path> {
        self.expander.home()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}
