use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

mod args;
mod cat;
mod cd;
mod chmod;
mod count;
mod cp;
mod exit;
mod files;
mod grep;
mod head;
mod help;
mod history;
mod less;
mod ls;
mod mkdir;
mod mv;
mod pwd;
mod randomline;
mod rm;
mod sort;
mod syscheck;
#[cfg(test)]
mod testing;
mod wc;

pub use args::{ArgSpec, ParsedArgs};
pub use cat::CatCommand;
pub use cd::CdCommand;
pub use chmod::ChmodCommand;
pub use count::CountCommand;
pub use cp::CpCommand;
pub use exit::ExitCommand;
pub use grep::GrepCommand;
pub use head::{HeadCommand, TailCommand};
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use less::LessCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use mv::MvCommand;
pub use pwd::PwdCommand;
pub use randomline::RandomLineCommand;
pub use rm::RmCommand;
pub use sort::SortCommand;
pub use syscheck::SysCheckCommand;
pub use wc::WcCommand;

use crate::core::config::DEFAULT_PAGE_SIZE;
use crate::core::fs::{FileSystem, LocalFs};
use crate::core::health::{HealthReporter, SystemHealth};
use crate::core::state::ShellState;
use crate::input::HistoryError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{command}: invalid argument '{value}': {reason}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        reason: String,
    },

    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("{}: already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{}: permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: {reason}", path.display())]
    InvalidTarget { path: PathBuf, reason: &'static str },

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl CommandError {
    pub fn missing(command: &'static str, what: &'static str) -> Self {
        CommandError::MissingArgument { command, what }
    }

    pub fn invalid(
        command: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CommandError::InvalidArgument {
            command,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Maps an OS error on `path` onto the taxonomy where a variant fits.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound(path),
            io::ErrorKind::PermissionDenied => CommandError::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => CommandError::AlreadyExists(path),
            _ => CommandError::Io { path, source: err },
        }
    }
}

/// What a successful command hands back to the dispatcher for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    /// Per-operand failures of a command that still produced output.
    pub errors: Vec<String>,
    /// Set by `exit` and `sysCheck esc` to stop the read-eval loop.
    pub exit: bool,
}

impl CommandOutput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn and_exit(mut self) -> Self {
        self.exit = true;
        self
    }
}

pub type CommandResult = Result<CommandOutput, CommandError>;

pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult;

    /// One-line description shown by `help`.
    fn summary(&self) -> &'static str;

    fn usage(&self) -> &'static str;
}

#[derive(Clone)]
enum CommandType {
    Ls(LsCommand),
    Rm(RmCommand),
    Cat(CatCommand),
    Less(LessCommand),
    Head(HeadCommand),
    Tail(TailCommand),
    Count(CountCommand),
    Pwd(PwdCommand),
    Mv(MvCommand),
    Cd(CdCommand),
    Mkdir(MkdirCommand),
    Cp(CpCommand),
    Grep(GrepCommand),
    Wc(WcCommand),
    Chmod(ChmodCommand),
    Sort(SortCommand),
    History(HistoryCommand),
    RandomLine(RandomLineCommand),
    SysCheck(SysCheckCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
}

impl CommandType {
    fn as_command(&self) -> &dyn Command {
        match self {
            CommandType::Ls(cmd) => cmd,
            CommandType::Rm(cmd) => cmd,
            CommandType::Cat(cmd) => cmd,
            CommandType::Less(cmd) => cmd,
            CommandType::Head(cmd) => cmd,
            CommandType::Tail(cmd) => cmd,
            CommandType::Count(cmd) => cmd,
            CommandType::Pwd(cmd) => cmd,
            CommandType::Mv(cmd) => cmd,
            CommandType::Cd(cmd) => cmd,
            CommandType::Mkdir(cmd) => cmd,
            CommandType::Cp(cmd) => cmd,
            CommandType::Grep(cmd) => cmd,
            CommandType::Wc(cmd) => cmd,
            CommandType::Chmod(cmd) => cmd,
            CommandType::Sort(cmd) => cmd,
            CommandType::History(cmd) => cmd,
            CommandType::RandomLine(cmd) => cmd,
            CommandType::SysCheck(cmd) => cmd,
            CommandType::Exit(cmd) => cmd,
            CommandType::Help(cmd) => cmd,
        }
    }
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> CommandResult {
        self.as_command().execute(args, state)
    }

    fn summary(&self) -> &'static str {
        self.as_command().summary()
    }

    fn usage(&self) -> &'static str {
        self.as_command().usage()
    }
}

/// Name-to-handler table, fixed once built.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandType>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(CommandType::as_command)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Collects the collaborators handlers are constructed with.
pub struct RegistryBuilder {
    fs: Arc<dyn FileSystem>,
    health: Arc<dyn HealthReporter>,
    page_size: usize,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            fs: Arc::new(LocalFs::new()),
            health: Arc::new(SystemHealth::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RegistryBuilder {
    pub fn filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn health(mut self, health: Arc<dyn HealthReporter>) -> Self {
        self.health = health;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn build(self) -> CommandRegistry {
        let fs = self.fs;
        let mut commands = BTreeMap::new();
        let mut register = |name: &str, command: CommandType| {
            commands.insert(name.to_string(), command);
        };

        register("ls", CommandType::Ls(LsCommand::new(fs.clone())));
        register("rm", CommandType::Rm(RmCommand::new(fs.clone())));
        register("cat", CommandType::Cat(CatCommand::new(fs.clone())));
        register(
            "less",
            CommandType::Less(LessCommand::new(fs.clone(), self.page_size)),
        );
        register("head", CommandType::Head(HeadCommand::new(fs.clone())));
        register("tail", CommandType::Tail(TailCommand::new(fs.clone())));
        register("count", CommandType::Count(CountCommand::new(fs.clone())));
        register("pwd", CommandType::Pwd(PwdCommand::new()));
        register("mv", CommandType::Mv(MvCommand::new(fs.clone())));
        register("cd", CommandType::Cd(CdCommand::new(fs.clone())));
        register("cd..", CommandType::Cd(CdCommand::parent(fs.clone())));
        register("cd~", CommandType::Cd(CdCommand::home(fs.clone())));
        register("mkdir", CommandType::Mkdir(MkdirCommand::new(fs.clone())));
        register("cp", CommandType::Cp(CpCommand::new(fs.clone())));
        register("grep", CommandType::Grep(GrepCommand::new(fs.clone())));
        register("wc", CommandType::Wc(WcCommand::new(fs.clone())));
        register("chmod", CommandType::Chmod(ChmodCommand::new(fs.clone())));
        register("sort", CommandType::Sort(SortCommand::new(fs.clone())));
        register("history", CommandType::History(HistoryCommand::new()));
        register(
            "randomline",
            CommandType::RandomLine(RandomLineCommand::new(fs.clone())),
        );
        register("sysCheck", CommandType::SysCheck(SysCheckCommand::new(self.health)));
        register("exit", CommandType::Exit(ExitCommand::new()));

        let topics = commands
            .iter()
            .map(|(name, cmd)| (name.clone(), cmd.summary(), cmd.usage()))
            .chain(std::iter::once((
                "help".to_string(),
                HelpCommand::SUMMARY,
                HelpCommand::USAGE,
            )))
            .collect();
        commands.insert("help".to_string(), CommandType::Help(HelpCommand::new(topics)));

        tracing::debug!(commands = commands.len(), "command registry built");
        CommandRegistry { commands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_knows_every_command() {
        let registry = CommandRegistry::default();
        for name in [
            "ls", "rm", "cat", "less", "head", "tail", "count", "pwd", "mv", "cd", "cd..", "cd~",
            "mkdir", "cp", "grep", "wc", "chmod", "sort", "history", "randomline", "sysCheck",
            "exit", "help",
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_lookup_unknown_and_case_sensitive() {
        let registry = CommandRegistry::default();
        assert!(registry.lookup("unknown_command").is_none());
        assert!(registry.lookup("LS").is_none());
        assert!(registry.lookup("syscheck").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_every_command_has_help_text() {
        let registry = CommandRegistry::default();
        for name in registry.names() {
            let cmd = registry.lookup(name).unwrap();
            assert!(!cmd.summary().is_empty(), "{name}");
            assert!(!cmd.usage().is_empty(), "{name}");
        }
    }

    #[test]
    fn test_io_error_mapping() {
        let kinds = [
            (io::ErrorKind::NotFound, "no such file"),
            (io::ErrorKind::PermissionDenied, "permission denied"),
            (io::ErrorKind::AlreadyExists, "already exists"),
        ];
        for (kind, text) in kinds {
            let err = CommandError::from_io("/x", io::Error::from(kind));
            assert!(err.to_string().contains(text), "{err}");
        }
        assert!(matches!(
            CommandError::from_io("/x", io::Error::other("boom")),
            CommandError::Io { .. }
        ));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::UnknownCommand("frob".to_string()),
            CommandError::missing("cat", "file operand"),
            CommandError::invalid("head", "x", "not a number"),
            CommandError::InvalidTarget {
                path: PathBuf::from("/tmp"),
                reason: "is a directory",
            },
            CommandError::History(HistoryError::NoSuchEntry(5)),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
        assert_eq!(
            CommandError::UnknownCommand("frob".into()).to_string(),
            "unknown command: frob"
        );
    }
}
