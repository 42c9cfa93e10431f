use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::{Command, CommandResult};
use crate::core::state::ShellState;
use crate::path::PathExpander;

/// A scratch directory with a shell state whose cwd and home both point at it.
pub(crate) fn sandbox() -> (TempDir, ShellState) {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().canonicalize().expect("canonical tempdir");
    let state = ShellState::with_expander(&root, PathExpander::with_home(&root));
    (dir, state)
}

pub(crate) fn write(state: &ShellState, name: &str, content: &str) {
    let path = state.current_dir().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir");
    }
    fs::write(path, content).expect("write fixture");
}

pub(crate) fn run(cmd: &dyn Command, state: &mut ShellState, args: &[&str]) -> CommandResult {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    cmd.execute(&args, state)
}

pub(crate) fn lines(cmd: &dyn Command, state: &mut ShellState, args: &[&str]) -> Vec<String> {
    match run(cmd, state, args) {
        Ok(output) => output.lines,
        Err(e) => panic!("{:?} failed: {}", args, e),
    }
}

pub(crate) fn exists(state: &ShellState, name: &str) -> bool {
    Path::new(&state.current_dir().join(name)).exists()
}
