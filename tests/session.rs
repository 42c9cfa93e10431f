use std::fs;
use std::path::PathBuf;

use marrow::core::commands::{CommandError, CommandRegistry};
use marrow::core::state::ShellState;
use marrow::input::{History, HistoryError};
use marrow::path::PathExpander;
use marrow::highlight::SyntaxHighlighter;
use marrow::shell::{run_lines, Dispatcher, Outcome};
use tempfile::TempDir;

struct Session {
    _dir: TempDir,
    root: PathBuf,
    dispatcher: Dispatcher,
}

impl Session {
    fn new() -> Self {
        Self::with_history(History::new())
    }

    fn with_history(history: History) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let state = ShellState::with_expander(&root, PathExpander::with_home(&root))
            .with_history(history);
        Session {
            _dir: dir,
            root,
            dispatcher: Dispatcher::new(CommandRegistry::default(), state),
        }
    }

    fn ok(&mut self, line: &str) -> Vec<String> {
        match self.dispatcher.dispatch(line) {
            Outcome::Completed { output, .. } => output.lines,
            other => panic!("{line}: unexpected {:?}", other),
        }
    }

    fn fail(&mut self, line: &str) -> CommandError {
        match self.dispatcher.dispatch(line) {
            Outcome::Failed { error, .. } => error,
            other => panic!("{line}: expected failure, got {:?}", other),
        }
    }

    fn history(&self) -> Vec<String> {
        self.dispatcher
            .history()
            .entries()
            .iter()
            .map(|e| e.to_string())
            .collect()
    }
}

#[test]
fn history_grows_by_one_per_line() {
    let mut s = Session::new();
    fs::write(s.root.join("a.txt"), "one\ntwo\n").unwrap();

    s.ok("ls");
    s.ok("cat a.txt");
    s.fail("cat nope.txt");
    s.ok("!2");

    assert_eq!(
        s.history(),
        ["1 ls", "2 cat a.txt", "3 cat nope.txt", "4 cat a.txt"]
    );
}

#[test]
fn failing_replay_still_records_resolved_text() {
    let mut s = Session::new();
    fs::write(s.root.join("gone.txt"), "soon\n").unwrap();
    assert_eq!(s.ok("cat gone.txt"), ["soon"]);
    fs::remove_file(s.root.join("gone.txt")).unwrap();

    match s.dispatcher.dispatch("!1") {
        Outcome::Failed { echo, error } => {
            assert_eq!(echo.as_deref(), Some("cat gone.txt"));
            assert!(matches!(error, CommandError::NotFound(_)));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(s.history(), ["1 cat gone.txt", "2 cat gone.txt"]);
}

#[test]
fn piped_input_survives_invalid_utf8() {
    let mut s = Session::new();
    let input: &[u8] = b"pwd\n\xff\xfe\npwd\nexit\n";
    let (mut out, mut err) = (Vec::new(), Vec::new());
    run_lines(
        &mut s.dispatcher,
        input,
        &mut out,
        &mut err,
        &SyntaxHighlighter::new(false),
    )
    .unwrap();

    assert_eq!(s.history(), ["1 pwd", "2 pwd", "3 exit"]);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    assert_eq!(String::from_utf8(err).unwrap().lines().count(), 1);
}

#[test]
fn replay_of_missing_entry_leaves_history_alone() {
    let mut s = Session::new();
    s.ok("ls");
    s.ok("pwd");

    let listed = s.ok("ls");
    assert_eq!(s.ok("!1"), listed);
    assert_eq!(s.history(), ["1 ls", "2 pwd", "3 ls", "4 ls"]);

    assert!(matches!(
        s.fail("!5"),
        CommandError::History(HistoryError::NoSuchEntry(5))
    ));
    assert!(matches!(
        s.fail("!0"),
        CommandError::History(HistoryError::NoSuchEntry(0))
    ));
    assert!(matches!(
        s.fail("!abc"),
        CommandError::History(HistoryError::Malformed(_))
    ));
    assert_eq!(s.history().len(), 4);
}

#[test]
fn repeated_replay_creates_distinct_entries() {
    let mut s = Session::new();
    s.ok("pwd");
    s.ok("!1");
    s.ok("!1");

    let entries = s.dispatcher.history().entries();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.text == "pwd"));
    let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
    assert_eq!(indices, [1, 2, 3]);
}

#[test]
fn whitespace_only_lines_do_nothing() {
    let mut s = Session::new();
    for line in ["", " ", "\t  \t"] {
        assert!(matches!(s.dispatcher.dispatch(line), Outcome::Ignored));
    }
    assert!(s.history().is_empty());
}

#[test]
fn failed_cd_keeps_directory() {
    let mut s = Session::new();
    let before = s.ok("pwd");

    assert!(matches!(s.fail("cd does/not/exist"), CommandError::NotFound(_)));
    assert_eq!(s.ok("pwd"), before);
    assert_eq!(s.dispatcher.state().current_dir(), s.root);
}

#[test]
fn cd_moves_between_directories() {
    let mut s = Session::new();
    s.ok("mkdir -p a/b");
    s.ok("cd a/b");
    assert_eq!(s.ok("pwd"), [s.root.join("a/b").display().to_string()]);
    s.ok("cd..");
    assert_eq!(s.dispatcher.state().current_dir(), s.root.join("a"));
    s.ok("cd~");
    assert_eq!(s.dispatcher.state().current_dir(), s.root);
}

#[test]
fn second_mkdir_reports_already_exists() {
    let mut s = Session::new();
    s.ok("mkdir foo");
    fs::write(s.root.join("foo/keep"), "x").unwrap();

    assert!(matches!(s.fail("mkdir foo"), CommandError::AlreadyExists(_)));
    assert_eq!(fs::read_to_string(s.root.join("foo/keep")).unwrap(), "x");
    assert_eq!(s.history(), ["1 mkdir foo", "2 mkdir foo"]);
}

#[test]
fn cyclic_reference_is_reported() {
    let mut history = History::new();
    for text in ["ls", "pwd", "ls", "!4"] {
        history.push(text);
    }
    let mut s = Session::with_history(history);

    assert!(matches!(
        s.fail("!4"),
        CommandError::History(HistoryError::Cyclic(4))
    ));
    assert_eq!(s.history().len(), 4);
}

#[test]
fn text_commands_leave_inputs_untouched() {
    let mut s = Session::new();
    let content = "pear\napple\npear\n";
    fs::write(s.root.join("f.txt"), content).unwrap();

    assert_eq!(s.ok("sort -u f.txt"), ["apple", "pear"]);
    assert_eq!(s.ok("count f.txt pear"), ["2"]);
    assert_eq!(s.ok("grep -c pear f.txt"), ["2"]);
    assert_eq!(s.ok("wc -l f.txt"), ["3 f.txt"]);
    assert_eq!(fs::read_to_string(s.root.join("f.txt")).unwrap(), content);
}

#[test]
fn exit_requests_stop() {
    let mut s = Session::new();
    assert!(s.dispatcher.dispatch("exit").should_exit());
    assert!(s.dispatcher.dispatch("sysCheck esc").should_exit());
    assert!(!s.dispatcher.dispatch("sysCheck").should_exit());
}
