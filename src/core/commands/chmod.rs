use std::sync::Arc;

use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::FileSystem;
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct ChmodCommand {
    fs: Arc<dyn FileSystem>,
}

impl ChmodCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Command for ChmodCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let (mode, operands) = args
            .split_first()
            .ok_or(CommandError::missing("chmod", "mode"))?;
        let targets = files::operands(state, operands, "chmod", "file operand")?;

        for (_, path) in targets {
            let stat = files::existing(self.fs.as_ref(), &path)?;
            let new_mode = apply_mode(mode, stat.mode)
                .map_err(|reason| CommandError::invalid("chmod", mode.as_str(), reason))?;
            self.fs
                .chmod(&path, new_mode)
                .map_err(|e| CommandError::from_io(&path, e))?;
        }
        Ok(CommandOutput::none())
    }

    fn summary(&self) -> &'static str {
        "change file permissions"
    }

    fn usage(&self) -> &'static str {
        "chmod MODE PATH...   (MODE: 755 or u+x,go-w,a=r)"
    }
}

/// Computes the permission bits `mode` yields when applied to `current`.
///
/// Accepts an octal mode of up to four digits, or comma separated symbolic
/// clauses `[ugoa]*[+-=][rwx]*`; with no who letters the clause applies to all.
fn apply_mode(mode: &str, current: u32) -> Result<u32, String> {
    if !mode.is_empty() && mode.bytes().all(|b| b.is_ascii_digit()) {
        if mode.len() > 4 {
            return Err("octal mode has at most four digits".to_string());
        }
        return u32::from_str_radix(mode, 8).map_err(|_| "not an octal number".to_string());
    }

    let mut bits = current & 0o7777;
    for clause in mode.split(',') {
        bits = apply_clause(clause, bits)?;
    }
    Ok(bits)
}

fn apply_clause(clause: &str, mut mode: u32) -> Result<u32, String> {
    let op_at = clause
        .find(['+', '-', '='])
        .ok_or_else(|| format!("missing operator in '{}'", clause))?;
    let (who, rest) = clause.split_at(op_at);

    let mut mask = 0;
    for c in who.chars() {
        mask |= match c {
            'u' => 0o700,
            'g' => 0o070,
            'o' => 0o007,
            'a' => 0o777,
            other => return Err(format!("unknown class '{}'", other)),
        };
    }
    if mask == 0 {
        mask = 0o777;
    }

    let mut chars = rest.chars().peekable();
    while let Some(op) = chars.next() {
        let mut perms = 0;
        while let Some(&c) = chars.peek() {
            perms |= match c {
                'r' => 0o444,
                'w' => 0o222,
                'x' => 0o111,
                '+' | '-' | '=' => break,
                other => return Err(format!("unknown permission '{}'", other)),
            };
            chars.next();
        }
        let bits = perms & mask;
        mode = match op {
            '+' => mode | bits,
            '-' => mode & !bits,
            _ => (mode & !mask) | bits,
        };
    }
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{run, sandbox, write};
    use crate::core::fs::LocalFs;

    fn chmod() -> ChmodCommand {
        ChmodCommand::new(Arc::new(LocalFs::new()))
    }

    #[test]
    fn test_octal() {
        assert_eq!(apply_mode("755", 0).unwrap(), 0o755);
        assert_eq!(apply_mode("0644", 0o777).unwrap(), 0o644);
        assert!(apply_mode("789", 0).is_err());
        assert!(apply_mode("77777", 0).is_err());
    }

    #[test]
    fn test_symbolic() {
        assert_eq!(apply_mode("u+x", 0o644).unwrap(), 0o744);
        assert_eq!(apply_mode("go-w", 0o666).unwrap(), 0o644);
        assert_eq!(apply_mode("a=r", 0o755).unwrap(), 0o444);
        assert_eq!(apply_mode("+x", 0o644).unwrap(), 0o755);
        assert_eq!(apply_mode("u=rw,g=r,o=", 0o777).unwrap(), 0o640);
        assert_eq!(apply_mode("u+r-w", 0o200).unwrap(), 0o400);
    }

    #[test]
    fn test_symbolic_errors() {
        assert!(apply_mode("z+x", 0).is_err());
        assert!(apply_mode("u+q", 0).is_err());
        assert!(apply_mode("rw", 0).is_err());
        assert!(apply_mode("", 0).is_err());
    }

    #[test]
    fn test_chmod_file() {
        let (_dir, mut state) = sandbox();
        write(&state, "script", "");
        run(&chmod(), &mut state, &["700", "script"]).unwrap();
        let stat = LocalFs.stat(&state.resolve("script")).unwrap();
        assert_eq!(stat.mode, 0o700);
    }

    #[test]
    fn test_chmod_errors() {
        let (_dir, mut state) = sandbox();
        write(&state, "f", "");
        assert!(matches!(
            run(&chmod(), &mut state, &[]),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            run(&chmod(), &mut state, &["755"]),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            run(&chmod(), &mut state, &["9z", "f"]),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            run(&chmod(), &mut state, &["755", "ghost"]),
            Err(CommandError::NotFound(_))
        ));
    }
}
