use std::path::PathBuf;

use clap::Parser;

/// marrow - a small interactive shell with history replay
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "marrow", version, about)]
pub struct Flags {
    /// Suppress the banner and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Read this rc file instead of ~/.marrowrc
    #[arg(short, long, value_name = "PATH", env = "MARROW_RC")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Dispatch a single line and exit
    #[arg(short, long, value_name = "LINE")]
    pub execute: Option<String>,
}

impl Flags {
    /// Log filter used when `MARROW_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
