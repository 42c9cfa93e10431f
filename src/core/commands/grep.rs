use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("grep").switches("ivnc");

#[derive(Clone)]
pub struct GrepCommand {
    fs: Arc<dyn FileSystem>,
}

impl GrepCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

fn build_pattern(pattern: &str, ignore_case: bool) -> Result<Regex, CommandError> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| CommandError::invalid("grep", pattern, e.to_string()))
}

impl Command for GrepCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let (pattern, paths) = parsed
            .operands
            .split_first()
            .ok_or(CommandError::missing("grep", "pattern"))?;
        let regex = build_pattern(pattern, parsed.has('i'))?;
        let (invert, numbers, count_only) = (parsed.has('v'), parsed.has('n'), parsed.has('c'));

        let targets = files::operands(state, paths, "grep", "file operand")?;
        let with_names = targets.len() > 1;

        let mut out = Vec::new();
        for (name, path) in targets {
            let text = files::read_text(self.fs.as_ref(), &path)?;
            let prefix = if with_names {
                format!("{}:", name)
            } else {
                String::new()
            };

            let matches = text
                .lines()
                .enumerate()
                .filter(|(_, line)| regex.is_match(line) != invert);

            if count_only {
                out.push(format!("{}{}", prefix, matches.count()));
                continue;
            }
            for (i, line) in matches {
                if numbers {
                    out.push(format!("{}{}:{}", prefix, i + 1, line));
                } else {
                    out.push(format!("{}{}", prefix, line));
                }
            }
        }
        Ok(CommandOutput::lines(out))
    }

    fn summary(&self) -> &'static str {
        "print lines matching a pattern"
    }

    fn usage(&self) -> &'static str {
        "grep [-i] [-v] [-n] [-c] PATTERN PATH..."
    }
}
