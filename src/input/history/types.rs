use std::fmt;

use thiserror::Error;

/// One recorded command line. Indices start at 1 and are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub index: usize,
    pub text: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.text)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("malformed history reference: {0}")]
    Malformed(String),

    #[error("no such history entry: !{0}")]
    NoSuchEntry(usize),

    #[error("cyclic history reference: !{0}")]
    Cyclic(usize),
}
