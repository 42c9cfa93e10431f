use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("less").valued("p");

/// Shows one page of a file followed by a position footer.
#[derive(Clone)]
pub struct LessCommand {
    fs: Arc<dyn FileSystem>,
    page_size: usize,
}

impl LessCommand {
    pub fn new(fs: Arc<dyn FileSystem>, page_size: usize) -> Self {
        Self {
            fs,
            page_size: page_size.max(1),
        }
    }
}

impl Command for LessCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let page = parsed.count("less", 'p', 1)?;
        if page == 0 {
            return Err(CommandError::invalid("less", "0", "pages start at 1"));
        }

        let operand = parsed
            .operands
            .first()
            .ok_or(CommandError::missing("less", "file operand"))?;
        let text = files::read_text(self.fs.as_ref(), &state.resolve(operand))?;
        let lines: Vec<&str> = text.lines().collect();
        let total = lines.len();

        let start = (page - 1).saturating_mul(self.page_size);
        if start >= total && !(page == 1 && total == 0) {
            return Err(CommandError::invalid(
                "less",
                page.to_string(),
                format!("past the end ({} lines)", total),
            ));
        }
        let end = (start + self.page_size).min(total);

        let mut out: Vec<String> = lines[start..end].iter().map(|l| l.to_string()).collect();
        out.push(format!("--Lines {}-{} of {}--", (start + 1).min(total), end, total));
        Ok(CommandOutput::lines(out))
    }

    fn summary(&self) -> &'static str {
        "view a file one page at a time"
    }

    fn usage(&self) -> &'static str {
        "less [-p PAGE] PATH"
    }
}
