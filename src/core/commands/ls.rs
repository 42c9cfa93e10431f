use std::sync::Arc;

use super::args::ArgSpec;
use super::files;
use super::{Command, CommandError, CommandOutput, CommandResult};
use crate::core::fs::{FileStat, FileSystem};
use crate::core::state::ShellState;

const SPEC: ArgSpec = ArgSpec::new("ls").switches("alh");

#[derive(Clone)]
pub struct LsCommand {
    fs: Arc<dyn FileSystem>,
}

impl LsCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn format_entry(&self, name: &str, stat: &FileStat, long: bool, human: bool) -> String {
        if !long {
            return name.to_string();
        }
        let size = if human {
            human_size(stat.size)
        } else {
            stat.size.to_string()
        };
        format!("{} {:>3} {:>8} {}", mode_string(stat), stat.nlink, size, name)
    }
}

impl Command for LsCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        let parsed = SPEC.parse(args)?;
        let (all, long, human) = (parsed.has('a'), parsed.has('l'), parsed.has('h'));

        let operands = if parsed.operands.is_empty() {
            vec![".".to_string()]
        } else {
            parsed.operands
        };
        let with_headers = operands.len() > 1;

        let mut lines = Vec::new();
        for (i, operand) in operands.iter().enumerate() {
            let path = state.resolve(operand);
            let stat = files::existing(self.fs.as_ref(), &path)?;

            if !stat.is_dir {
                lines.push(self.format_entry(operand, &stat, long, human));
                continue;
            }

            if with_headers {
                if i > 0 {
                    lines.push(String::new());
                }
                lines.push(format!("{}:", operand));
            }

            let entries = self
                .fs
                .list(&path)
                .map_err(|e| CommandError::from_io(&path, e))?;
            lines.extend(
                entries
                    .iter()
                    .filter(|entry| all || !entry.name.starts_with('.'))
                    .map(|entry| self.format_entry(&entry.name, &entry.stat, long, human)),
            );
        }

        Ok(CommandOutput::lines(lines))
    }

    fn summary(&self) -> &'static str {
        "list directory contents"
    }

    fn usage(&self) -> &'static str {
        "ls [-a] [-l] [-h] [PATH...]"
    }
}

fn mode_string(stat: &FileStat) -> String {
    let kind = if stat.is_symlink {
        'l'
    } else if stat.is_dir {
        'd'
    } else {
        '-'
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (stat.mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

fn human_size(size: u64) -> String {
    const UNITS: [&str; 6] = ["B", "K", "M", "G", "T", "P"];
    if size < 1024 {
        return format!("{}B", size);
    }
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{lines, run, sandbox, write};
    use crate::core::fs::LocalFs;

    fn ls() -> LsCommand {
        LsCommand::new(Arc::new(LocalFs::new()))
    }

    #[test]
    fn test_hidden_files_need_a() {
        let (_dir, mut state) = sandbox();
        write(&state, "b.txt", "");
        write(&state, "a.txt", "");
        write(&state, ".secret", "");

        assert_eq!(lines(&ls(), &mut state, &[]), ["a.txt", "b.txt"]);
        assert_eq!(lines(&ls(), &mut state, &["-a"]), [".secret", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_headers_for_several_paths() {
        let (_dir, mut state) = sandbox();
        write(&state, "one/x", "");
        write(&state, "two/y", "");

        assert_eq!(
            lines(&ls(), &mut state, &["one", "two"]),
            ["one:", "x", "", "two:", "y"]
        );
    }

    #[test]
    fn test_file_operand_lists_itself() {
        let (_dir, mut state) = sandbox();
        write(&state, "notes.txt", "hello");
        assert_eq!(lines(&ls(), &mut state, &["notes.txt"]), ["notes.txt"]);
    }

    #[test]
    fn test_long_format() {
        let (_dir, mut state) = sandbox();
        write(&state, "f", "12345");
        let out = lines(&ls(), &mut state, &["-l"]);
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with('-'));
        assert!(out[0].ends_with(" 5 f"), "{}", out[0]);
    }

    #[test]
    fn test_missing_path() {
        let (_dir, mut state) = sandbox();
        assert!(matches!(
            run(&ls(), &mut state, &["ghost"]),
            Err(CommandError::NotFound(_))
        ));
    }

    #[test]
    fn test_mode_string_and_sizes() {
        let stat = FileStat {
            exists: true,
            is_dir: true,
            mode: 0o755,
            ..FileStat::default()
        };
        assert_eq!(mode_string(&stat), "drwxr-xr-x");
        assert_eq!(human_size(512), "512B");
        assert_eq!(human_size(2048), "2.0K");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0M");
    }
}
