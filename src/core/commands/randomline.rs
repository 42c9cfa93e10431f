use std::sync::Arc;

use rand::seq::IndexedRandom;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("randomline").valued("n").numeric('n');

#[derive(Clone)]
pub struct RandomLineCommand {
    fs: Arc<dyn FileSystem>,
}

impl RandomLineCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for RandomLineCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let n = parsed.count("randomline", 'n', 1)?;

        let mut pool = Vec::new();
        for (_, path) in files::operands(state, &parsed.operands, "randomline", "file operand")? {
            let text = files::read_text(self.fs.as_ref(), &path)?;
            pool.extend(text.lines().map(str::to_string));
        }

        let picked = pool
            .choose_multiple(&mut rand::rng(), n)
            .cloned()
            .collect();
        Ok(CommandOutput::lines(picked))
    }

    fn summary(&self) -> &'static str {
        "print random lines from files"
    }

    fn usage(&self) -> &'static str {
        "randomline [-n N] PATH..."
    }
}
