use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const DEFAULT_LINES: usize = 10;

#[derive(Clone, Copy)]
enum End {
    Head,
    Tail,
}

impl End {
    fn name(self) -> &'static str {
        match self {
            End::Head => "head",
            End::Tail => "tail",
        }
    }

    fn spec(self) -> ArgSpec {
        ArgSpec::new(self.name()).valued("n").numeric('n')
    }

    fn take<'a>(self, lines: &'a [&'a str], n: usize) -> &'a [&'a str] {
        match self {
            End::Head => &lines[..n.min(lines.len())],
            End::Tail => &lines[lines.len().saturating_sub(n)..],
        }
    }
}

fn run_end(
    end: End,
    fs: &dyn FileSystem,
    args: &[String],
    state: &ShellState,
) -> CommandResult {
    let parsed = end.spec().parse(args)?;
    let n = parsed.count(end.name(), 'n', DEFAULT_LINES)?;
    let targets = files::operands(state, &parsed.operands, end.name(), "file operand")?;
    let with_headers = targets.len() > 1;

    let read = files::read_each(fs, targets)?;

    let mut out = Vec::new();
    for (name, text) in &read.texts {
        let lines: Vec<&str> = text.lines().collect();
        if with_headers {
            out.push(files::header(name));
        }
        out.extend(end.take(&lines, n).iter().map(|l| l.to_string()));
    }
    Ok(CommandOutput::lines(out).with_errors(read.errors))
}

#[derive(Clone)]
pub struct HeadCommand {
    fs: Arc<dyn FileSystem>,
}

impl HeadCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for HeadCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        run_end(End::Head, self.fs.as_ref(), args, state)
    }

    fn summary(&self) -> &'static str {
        "print the first lines of files"
    }

    fn usage(&self) -> &'static str {
        "head [-n N] PATH..."
    }
}

#[derive(Clone)]
pub struct TailCommand {
    fs: Arc<dyn FileSystem>,
}

impl TailCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for TailCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        run_end(End::Tail, self.fs.as_ref(), args, state)
    }

    fn summary(&self) -> &'static str {
        "print the last lines of files"
    }

    fn usage(&self) -> &'static str {
        "tail [-n N] PATH..."
    }
}
