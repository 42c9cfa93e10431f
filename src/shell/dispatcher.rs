use std::io::{self, BufRead, Write};

use crate::core::commands::{CommandError, CommandOutput, CommandRegistry};
use crate::core::config::AliasManager;
use crate::core::state::ShellState;
use crate::highlight::SyntaxHighlighter;
use crate::input::{is_reference, tokenize, History};

/// What happened to one input line.
#[derive(Debug)]
pub enum Outcome {
    /// Blank line: nothing ran and nothing was recorded.
    Ignored,
    Completed {
        /// Resolved text of a `!N` line, shown before its output.
        echo: Option<String>,
        output: CommandOutput,
    },
    Failed {
        echo: Option<String>,
        error: CommandError,
    },
}

impl Outcome {
    pub fn should_exit(&self) -> bool {
        matches!(self, Outcome::Completed { output, .. } if output.exit)
    }

    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Turns input lines into handler calls and keeps the history log.
pub struct Dispatcher {
    registry: CommandRegistry,
    state: ShellState,
    aliases: AliasManager,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, state: ShellState) -> Self {
        Self {
            registry,
            state,
            aliases: AliasManager::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: AliasManager) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn history(&self) -> &History {
        self.state.history()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let typed = line.trim();
        if typed.is_empty() {
            return Outcome::Ignored;
        }

        let (text, echo) = if is_reference(typed) {
            match self.state.history().resolve(typed) {
                Ok(resolved) => (resolved.clone(), Some(resolved)),
                Err(e) => {
                    tracing::debug!(line = typed, error = %e, "history reference rejected");
                    return Outcome::Failed {
                        echo: None,
                        error: e.into(),
                    };
                }
            }
        } else {
            (typed.to_string(), None)
        };

        let Some(parsed) = tokenize(&text) else {
            return Outcome::Ignored;
        };
        let parsed = self.aliases.expand(parsed);

        let Some(command) = self.registry.lookup(&parsed.name) else {
            return Outcome::Failed {
                echo,
                error: CommandError::UnknownCommand(parsed.name),
            };
        };

        tracing::debug!(command = %parsed.name, args = parsed.args.len(), "dispatching");
        let result = command.execute(&parsed.args, &mut self.state);
        self.state.history_mut().push(text);

        match result {
            Ok(output) => Outcome::Completed { echo, output },
            Err(error) => Outcome::Failed { echo, error },
        }
    }
}

/// Writes an outcome: payload and echo to `out`, `error: ...` to `err`.
pub fn render(
    outcome: &Outcome,
    out: &mut impl Write,
    err: &mut impl Write,
    highlighter: &SyntaxHighlighter,
) -> io::Result<()> {
    match outcome {
        Outcome::Ignored => {}
        Outcome::Completed { echo, output } => {
            if let Some(echo) = echo {
                writeln!(out, "{}", echo)?;
            }
            for line in &output.lines {
                writeln!(out, "{}", line)?;
            }
            if !output.errors.is_empty() {
                out.flush()?;
                for message in &output.errors {
                    writeln!(err, "{}", highlighter.highlight_error(&format!("error: {}", message)))?;
                }
            }
        }
        Outcome::Failed { echo, error } => {
            if let Some(echo) = echo {
                writeln!(out, "{}", echo)?;
            }
            out.flush()?;
            writeln!(err, "{}", highlighter.highlight_error(&format!("error: {}", error)))?;
        }
    }
    out.flush()
}

/// Non-interactive loop: dispatches every line of `input` until EOF or an
/// exit request. Invalid UTF-8 in a line is replaced, not fatal.
pub fn run_lines(
    dispatcher: &mut Dispatcher,
    mut input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    highlighter: &SyntaxHighlighter,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let outcome = dispatcher.dispatch(line.trim_end_matches(['\n', '\r']));
        render(&outcome, out, err, highlighter)?;
        if outcome.should_exit() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistoryError;
    use crate::path::PathExpander;
    use tempfile::TempDir;

    fn dispatcher() -> (TempDir, Dispatcher) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let state = ShellState::with_expander(&root, PathExpander::with_home(&root));
        (dir, Dispatcher::new(CommandRegistry::default(), state))
    }

    fn texts(dispatcher: &Dispatcher) -> Vec<String> {
        dispatcher
            .history()
            .entries()
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let (_dir, mut d) = dispatcher();
        assert!(matches!(d.dispatch("   \t"), Outcome::Ignored));
        assert!(matches!(d.dispatch(""), Outcome::Ignored));
        assert!(d.history().is_empty());
    }

    #[test]
    fn test_unknown_command_not_recorded() {
        let (_dir, mut d) = dispatcher();
        let outcome = d.dispatch("frobnicate now");
        assert!(matches!(
            outcome.error(),
            Some(CommandError::UnknownCommand(name)) if name == "frobnicate"
        ));
        assert!(d.history().is_empty());
    }

    #[test]
    fn test_failed_known_command_is_recorded() {
        let (_dir, mut d) = dispatcher();
        assert!(d.dispatch("cat missing.txt").error().is_some());
        assert_eq!(texts(&d), ["cat missing.txt"]);
    }

    #[test]
    fn test_history_does_not_list_itself() {
        let (_dir, mut d) = dispatcher();
        d.dispatch("pwd");
        match d.dispatch("history") {
            Outcome::Completed { output, .. } => assert_eq!(output.lines, ["1 pwd"]),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(texts(&d), ["pwd", "history"]);
    }

    #[test]
    fn test_replay_records_resolved_text() {
        let (_dir, mut d) = dispatcher();
        d.dispatch("pwd");
        match d.dispatch("  !1 ") {
            Outcome::Completed { echo, output } => {
                assert_eq!(echo.as_deref(), Some("pwd"));
                assert_eq!(output.lines.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(texts(&d), ["pwd", "pwd"]);
    }

    #[test]
    fn test_bad_references_not_recorded() {
        let (_dir, mut d) = dispatcher();
        d.dispatch("pwd");
        for (line, expected) in [
            ("!0", HistoryError::NoSuchEntry(0)),
            ("!9", HistoryError::NoSuchEntry(9)),
            ("!x", HistoryError::Malformed("!x".to_string())),
            ("!1 extra", HistoryError::Malformed("!1 extra".to_string())),
        ] {
            match d.dispatch(line) {
                Outcome::Failed {
                    error: CommandError::History(e),
                    echo: None,
                } => assert_eq!(e, expected, "{line}"),
                other => panic!("{line}: unexpected {:?}", other),
            }
        }
        assert_eq!(d.history().len(), 1);
    }

    #[test]
    fn test_alias_expands_but_history_keeps_typed_text() {
        let (_dir, d) = dispatcher();
        let mut aliases = AliasManager::new();
        aliases.add("where", "pwd");
        let mut d = d.with_aliases(aliases);
        assert!(matches!(d.dispatch("where"), Outcome::Completed { .. }));
        assert_eq!(texts(&d), ["where"]);
    }

    #[test]
    fn test_exit_stops_run_lines() {
        let (_dir, mut d) = dispatcher();
        let input = b"pwd\n\nexit\npwd\n";
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_lines(&mut d, &input[..], &mut out, &mut err, &SyntaxHighlighter::new(false)).unwrap();

        assert_eq!(d.history().len(), 2);
        let stdout = String::from_utf8(out).unwrap();
        assert_eq!(stdout.lines().count(), 1);
        assert!(err.is_empty());
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_run_lines() {
        let (_dir, mut d) = dispatcher();
        let input = b"pwd\n\xff\xfe\npwd";
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_lines(&mut d, &input[..], &mut out, &mut err, &SyntaxHighlighter::new(false)).unwrap();

        assert_eq!(d.history().len(), 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("error: unknown command: "), "{stderr}");
    }

    #[test]
    fn test_partial_errors_go_to_stderr() {
        let (dir, mut d) = dispatcher();
        std::fs::write(dir.path().join("a"), "alpha\n").unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_lines(&mut d, &b"cat a ghost\n"[..], &mut out, &mut err, &SyntaxHighlighter::new(false))
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "alpha\n");
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("error: ") && stderr.contains("ghost"), "{stderr}");
        assert_eq!(d.history().len(), 1);
    }

    #[test]
    fn test_errors_go_to_stderr() {
        let (_dir, mut d) = dispatcher();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_lines(&mut d, &b"nope\n"[..], &mut out, &mut err, &SyntaxHighlighter::new(false))
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "error: unknown command: nope\n");
    }
}
