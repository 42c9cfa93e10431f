use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;
use crate::path::PathExpander;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// rustyline helper: completes command names in the first word and paths
/// afterwards, and highlights the line as it is typed.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
    commands: Vec<String>,
}

impl ShellCompleter {
    pub fn new(commands: Vec<String>, cwd: PathBuf, expander: PathExpander, color: bool) -> Self {
        let mut highlighter = SyntaxHighlighter::new(color);
        highlighter.set_known(commands.iter().map(String::as_str));
        ShellCompleter {
            command_completer: CommandCompleter::new(commands.iter().map(String::as_str)),
            path_completer: PathCompleter::new(cwd, expander),
            highlighter,
            commands,
        }
    }

    pub fn update_aliases(&mut self, aliases: &[String]) {
        self.command_completer
            .update_aliases(aliases.iter().map(String::as_str));
        self.highlighter.set_known(
            self.commands
                .iter()
                .chain(aliases)
                .map(String::as_str),
        );
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        self.path_completer.set_cwd(cwd);
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.highlighter.enabled() {
            Cow::Owned(self.highlighter.highlight_command(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.enabled()
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let (word_start, first_word) = current_word(line_up_to_cursor);
        let word = &line_up_to_cursor[word_start..];

        let matches = if first_word {
            self.command_completer.complete_command(word)
        } else {
            self.path_completer.complete_path(word)
        };

        Ok((word_start, matches))
    }
}

/// Byte offset where the word under the cursor starts, and whether it is
/// the first word of the line. Whitespace may be multibyte.
fn current_word(line: &str) -> (usize, bool) {
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    (start, line[..start].trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_word() {
        assert_eq!(current_word(""), (0, true));
        assert_eq!(current_word("ca"), (0, true));
        assert_eq!(current_word("  ca"), (2, true));
        assert_eq!(current_word("cat no"), (4, false));
        assert_eq!(current_word("cat "), (4, false));
    }

    #[test]
    fn test_current_word_after_multibyte_space() {
        let line = "ls\u{a0}x";
        let (start, first) = current_word(line);
        assert_eq!(start, 4);
        assert_eq!(&line[start..], "x");
        assert!(!first);

        let line = "cat\u{3000}\u{3000}";
        assert_eq!(current_word(line), (line.len(), false));
    }
}
