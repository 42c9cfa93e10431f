use std::io::{self, IsTerminal};

use clap::Parser;
use marrow::core::config::{Config, ConfigPaths};
use marrow::error::ShellError;
use marrow::flags::Flags;
use marrow::highlight::SyntaxHighlighter;
use marrow::shell::{self, Shell};
use tracing_subscriber::EnvFilter;

fn load_config(flags: &Flags) -> Result<Config, ShellError> {
    let mut config = match &flags.config {
        Some(path) => Config::with_paths(ConfigPaths::with_rc(path.clone())),
        None => Config::new()?,
    };
    config.load()?;

    tracing::debug!(rc = %config.rc_path().display(), "configuration loaded");
    for (name, body) in config.aliases.get_all() {
        tracing::debug!(%name, %body, "alias");
    }
    Ok(config)
}

fn main() -> Result<(), ShellError> {
    let flags = Flags::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("MARROW_LOG")
                .unwrap_or_else(|_| EnvFilter::new(flags.log_level())),
        )
        .init();

    let config = load_config(&flags)?;
    let mut dispatcher = shell::build_dispatcher(&config)?;
    let color = config.color && !flags.no_color;

    if let Some(line) = &flags.execute {
        let highlighter = SyntaxHighlighter::new(color);
        let outcome = dispatcher.dispatch(line);
        shell::render(&outcome, &mut io::stdout(), &mut io::stderr(), &highlighter)?;
        return Ok(());
    }

    if !io::stdin().is_terminal() {
        let highlighter = SyntaxHighlighter::new(color && io::stderr().is_terminal());
        shell::run_lines(
            &mut dispatcher,
            io::stdin().lock(),
            &mut io::stdout(),
            &mut io::stderr(),
            &highlighter,
        )?;
        return Ok(());
    }

    let mut shell = Shell::new(&flags, config, dispatcher)?;
    shell.run()
}
