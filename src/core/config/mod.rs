use std::path::PathBuf;

use thiserror::Error;

mod aliases;
mod loader;
mod paths;

pub use aliases::AliasManager;
use loader::ConfigLoader;
pub use paths::ConfigPaths;

pub const DEFAULT_PROMPT: &str = "{cwd} $ ";
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Settings read from the rc file at startup.
#[derive(Debug, Clone)]
pub struct Config {
    paths: ConfigPaths,
    pub aliases: AliasManager,
    pub prompt: String,
    pub color: bool,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_paths(ConfigPaths::with_rc(PathBuf::new()))
    }
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_paths(ConfigPaths::new()?))
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Config {
            paths,
            aliases: AliasManager::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            color: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn load(&mut self) -> Result<(), ConfigError> {
        let paths = self.paths.clone();
        ConfigLoader::new(&paths).load_configs(self)
    }

    pub fn rc_path(&self) -> &std::path::Path {
        &self.paths.rc_path
    }

    pub fn render_prompt(&self, cwd: &std::path::Path) -> String {
        self.prompt.replace("{cwd}", &cwd.to_string_lossy())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
