use std::path::{Path, PathBuf};

use super::CommandError;
use crate::core::fs::{FileStat, FileSystem};
use crate::core::state::ShellState;

pub(crate) fn stat(fs: &dyn FileSystem, path: &Path) -> Result<FileStat, CommandError> {
    fs.stat(path).map_err(|e| CommandError::from_io(path, e))
}

/// Stats `path` and fails with `NotFound` when nothing is there.
pub(crate) fn existing(fs: &dyn FileSystem, path: &Path) -> Result<FileStat, CommandError> {
    let stat = stat(fs, path)?;
    if stat.exists {
        Ok(stat)
    } else {
        Err(CommandError::NotFound(path.to_path_buf()))
    }
}

/// Reads a regular file as text; invalid UTF-8 is replaced, not rejected.
pub(crate) fn read_text(fs: &dyn FileSystem, path: &Path) -> Result<String, CommandError> {
    if existing(fs, path)?.is_dir {
        return Err(CommandError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "is a directory",
        });
    }
    let bytes = fs.read(path).map_err(|e| CommandError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Text of every readable operand plus a message for each one that failed.
#[derive(Debug, Default)]
pub(crate) struct ReadAll {
    pub texts: Vec<(String, String)>,
    pub errors: Vec<String>,
}

/// Reads each operand in turn, carrying on past unreadable ones. Fails only
/// when none could be read, with the first operand's error.
pub(crate) fn read_each(
    fs: &dyn FileSystem,
    targets: Vec<(String, PathBuf)>,
) -> Result<ReadAll, CommandError> {
    let mut all = ReadAll::default();
    let mut first_error = None;
    for (name, path) in targets {
        match read_text(fs, &path) {
            Ok(text) => all.texts.push((name, text)),
            Err(e) => {
                all.errors.push(e.to_string());
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    match first_error {
        Some(e) if all.texts.is_empty() => Err(e),
        _ => Ok(all),
    }
}

/// Resolves every operand, failing when there are none.
pub(crate) fn operands(
    state: &ShellState,
    operands: &[String],
    command: &'static str,
    what: &'static str,
) -> Result<Vec<(String, PathBuf)>, CommandError> {
    if operands.is_empty() {
        return Err(CommandError::missing(command, what));
    }
    Ok(operands
        .iter()
        .map(|op| (op.clone(), state.resolve(op)))
        .collect())
}

/// Where `src` should land when copied or moved onto `dst`: inside it when
/// `dst` is an existing directory, at `dst` otherwise.
pub(crate) fn landing_path(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
) -> Result<PathBuf, CommandError> {
    if stat(fs, dst)?.is_dir {
        let name = src.file_name().ok_or_else(|| CommandError::InvalidTarget {
            path: src.to_path_buf(),
            reason: "has no file name",
        })?;
        Ok(dst.join(name))
    } else {
        Ok(dst.to_path_buf())
    }
}

/// `==> name <==` headers, used when a command reads more than one file.
pub(crate) fn header(name: &str) -> String {
    format!("==> {} <==", name)
}
