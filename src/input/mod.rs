mod completer;
pub mod history;
mod tokenizer;

pub use completer::ShellCompleter;
pub use history::{is_reference, History, HistoryEntry, HistoryError};
pub use tokenizer::{tokenize, ParsedCommand};
