use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("wc").switches("lwc");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
}

impl Counts {
    fn of(text: &str) -> Self {
        Self {
            lines: text.lines().count(),
            words: text.split_whitespace().count(),
            bytes: text.len(),
        }
    }

    fn add(&mut self, other: Counts) {
        self.lines += other.lines;
        self.words += other.words;
        self.bytes += other.bytes;
    }
}

#[derive(Clone, Copy)]
struct Columns {
    lines: bool,
    words: bool,
    bytes: bool,
}

impl Columns {
    fn render(self, counts: Counts, name: &str) -> String {
        let mut fields = Vec::with_capacity(4);
        if self.lines {
            fields.push(counts.lines.to_string());
        }
        if self.words {
            fields.push(counts.words.to_string());
        }
        if self.bytes {
            fields.push(counts.bytes.to_string());
        }
        fields.push(name.to_string());
        fields.join(" ")
    }
}

#[derive(Clone)]
pub struct WcCommand {
    fs: Arc<dyn FileSystem>,
}

impl WcCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for WcCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let any = parsed.has('l') || parsed.has('w') || parsed.has('c');
        let columns = Columns {
            lines: !any || parsed.has('l'),
            words: !any || parsed.has('w'),
            bytes: !any || parsed.has('c'),
        };

        let targets = files::operands(state, &parsed.operands, "wc", "file operand")?;
        let several = targets.len() > 1;
        let mut total = Counts::default();
        let mut out = Vec::new();

        let read = files::read_each(self.fs.as_ref(), targets)?;
        for (name, text) in &read.texts {
            let counts = Counts::of(text);
            total.add(counts);
            out.push(columns.render(counts, name));
        }
        if several {
            out.push(columns.render(total, "total"));
        }
        Ok(CommandOutput::lines(out).with_errors(read.errors))
    }

    fn summary(&self) -> &'static str {
        "count lines, words and bytes"
    }

    fn usage(&self) -> &'static str {
        "wc [-l] [-w] [-c] PATH..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{lines, run, sandbox, write};
    use crate::core::commands::CommandError;
    use crate::core::fs::LocalFs;

    fn wc() -> WcCommand {
        WcCommand::new(Arc::new(LocalFs::new()))
    }

    #[test]
    fn test_wc_counts_file() {
        let (_dir, mut state) = sandbox();
        write(&state, "f", "hello world\nsecond line here\n");
        assert_eq!(lines(&wc(), &mut state, &["f"]), ["2 5 29 f"]);
        assert_eq!(lines(&wc(), &mut state, &["-w", "f"]), ["5 f"]);
        assert_eq!(lines(&wc(), &mut state, &["-lc", "f"]), ["2 29 f"]);
    }

    #[test]
    fn test_wc_multiple_files_total() {
        let (_dir, mut state) = sandbox();
        write(&state, "a", "one\n");
        write(&state, "b", "two three\n");
        assert_eq!(
            lines(&wc(), &mut state, &["-w", "a", "b"]),
            ["1 a", "2 b", "3 total"]
        );
    }

    #[test]
    fn test_wc_reports_unreadable_and_totals_the_rest() {
        let (_dir, mut state) = sandbox();
        write(&state, "a", "one two\n");
        let out = run(&wc(), &mut state, &["-w", "a", "ghost"]).unwrap();
        assert_eq!(out.lines, ["2 a", "2 total"]);
        assert_eq!(out.errors.len(), 1);

        assert!(matches!(
            run(&wc(), &mut state, &["ghost", "gone"]),
            Err(CommandError::NotFound(_))
        ));
    }

    #[test]
    fn test_wc_missing_operand() {
        let (_dir, mut state) = sandbox();
        assert!(matches!(
            run(&wc(), &mut state, &[]),
            Err(CommandError::MissingArgument { .. })
        ));
    }
}
