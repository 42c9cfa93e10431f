use std::cmp::Ordering;
use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("sort").switches("rnu");

#[derive(Clone)]
pub struct SortCommand {
    fs: Arc<dyn FileSystem>,
}

impl SortCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

/// Leading number of a line for `-n`; lines without one sort as zero.
fn numeric_key(line: &str) -> f64 {
    let trimmed = line.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().unwrap_or(0.0)
}

fn compare(a: &str, b: &str, numeric: bool) -> Ordering {
    if numeric {
        numeric_key(a)
            .total_cmp(&numeric_key(b))
            .then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

impl Command for SortCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let numeric = parsed.has('n');

        let mut lines = Vec::new();
        for (_, path) in files::operands(state, &parsed.operands, "sort", "file operand")? {
            let text = files::read_text(self.fs.as_ref(), &path)?;
            lines.extend(text.lines().map(str::to_string));
        }

        lines.sort_by(|a, b| compare(a, b, numeric));
        if parsed.has('u') {
            lines.dedup();
        }
        if parsed.has('r') {
            lines.reverse();
        }
        Ok(CommandOutput::lines(lines))
    }

    fn summary(&self) -> &'static str {
        "print the lines of files in sorted order"
    }

    fn usage(&self) -> &'static str {
        "sort [-r] [-n] [-u] PATH..."
    }
}
