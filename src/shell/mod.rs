use std::env;
use std::io;

use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

mod dispatcher;

pub use dispatcher::{render, run_lines, Dispatcher, Outcome};

use crate::{
    core::{commands::CommandRegistry, config::Config, state::ShellState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
    path::PathExpander,
};

/// Builds a dispatcher rooted at the process working directory with the
/// registry and aliases `config` asks for.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher, ShellError> {
    let cwd = env::current_dir()?;
    let registry = CommandRegistry::builder()
        .page_size(config.page_size)
        .build();
    let state = ShellState::with_expander(cwd, PathExpander::new());
    Ok(Dispatcher::new(registry, state).with_aliases(config.aliases.clone()))
}

/// Interactive read-eval loop on a terminal.
pub struct Shell {
    editor: Editor<ShellCompleter, DefaultHistory>,
    dispatcher: Dispatcher,
    config: Config,
    highlighter: SyntaxHighlighter,
    quiet: bool,
}

impl Shell {
    pub fn new(flags: &Flags, config: Config, dispatcher: Dispatcher) -> Result<Self, ShellError> {
        let color = config.color && !flags.no_color;
        let commands: Vec<String> = dispatcher.registry().names().map(str::to_string).collect();
        let aliases: Vec<String> = dispatcher.aliases().names().map(str::to_string).collect();

        let mut completer = ShellCompleter::new(
            commands,
            dispatcher.state().current_dir().to_path_buf(),
            PathExpander::new(),
            color,
        );
        completer.update_aliases(&aliases);

        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(completer));

        // readline handles Ctrl-C itself; this covers the time a command runs
        ctrlc::set_handler(move || {
            eprintln!("\nuse 'exit' to leave the shell");
        })?;

        Ok(Shell {
            editor,
            dispatcher,
            config,
            highlighter: SyntaxHighlighter::new(color),
            quiet: flags.quiet,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.quiet {
            println!(
                "marrow {} - type 'help' for commands, 'exit' to leave",
                env!("CARGO_PKG_VERSION")
            );
        }

        loop {
            let prompt = self.config.render_prompt(self.dispatcher.state().current_dir());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "couldn't add line to readline history");
                        }
                    }

                    let outcome = self.dispatcher.dispatch(&line);
                    render(&outcome, &mut io::stdout(), &mut io::stderr(), &self.highlighter)?;
                    if outcome.should_exit() {
                        break;
                    }

                    let cwd = self.dispatcher.state().current_dir().to_path_buf();
                    if let Some(helper) = self.editor.helper_mut() {
                        helper.set_cwd(&cwd);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if !self.quiet {
                        println!("^C");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    if !self.quiet {
                        eprintln!("{}", self.highlighter.highlight_error(&format!("error: {}", e)));
                    }
                    continue;
                }
            }
        }
        Ok(())
    }
}
