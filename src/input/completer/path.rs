use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes path operands relative to the shell's working directory.
#[derive(Clone)]
pub struct PathCompleter {
    cwd: PathBuf,
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new(cwd: PathBuf, expander: PathExpander) -> Self {
        Self { cwd, expander }
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        self.cwd = cwd.to_path_buf();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        // the typed directory part is kept verbatim in replacements
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(slash) => incomplete.split_at(slash + 1),
            None => ("", incomplete),
        };
        let dir_to_search = if typed_dir.is_empty() {
            self.cwd.clone()
        } else {
            self.expander.expand(&self.cwd, typed_dir)
        };

        self.get_path_matches(&dir_to_search, typed_dir, file_prefix)
    }

    fn get_path_matches(&self, dir_to_search: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let Ok(entries) = fs::read_dir(dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                if name.starts_with('.') && !file_prefix.starts_with('.') {
                    return None;
                }
                Some(Self::create_completion_pair(&name, &entry.path(), typed_dir))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(name: &str, path: &Path, typed_dir: &str) -> Pair {
        let full = format!("{}{}", typed_dir, name);
        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", full),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", full),
            }
        }
    }
}
