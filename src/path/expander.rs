use std::path::{Component, Path, PathBuf};

/// Turns user-typed path operands into absolute paths.
///
/// `~` and `~/…` expand against the home directory, relative paths are
/// joined onto the shell's current directory, and `.`/`..` segments are
/// folded lexically so the result never depends on the process cwd.
#[derive(Debug, Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn expand(&self, cwd: &Path, path: &str) -> PathBuf {
        let expanded = self.expand_tilde(path);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        };
        normalize(&joined)
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        let Some(home) = &self.home else {
            return PathBuf::from(path);
        };

        if path == "~" {
            return home.clone();
        }

        match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            // "~user" forms are left alone
            None => PathBuf::from(path),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push("/");
    }
    out
}
