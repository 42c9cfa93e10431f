use thiserror::Error;

use crate::core::config::ConfigError;

/// Failures that stop the shell before or outside the read-eval loop.
///
/// Anything a single command can get wrong is a
/// [`CommandError`](crate::core::commands::CommandError) instead and never
/// reaches this type.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("ctrl-c handler: {0}")]
    CtrlC(#[from] ctrlc::Error),
}
