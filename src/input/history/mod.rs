mod types;

use std::collections::BTreeSet;

pub use types::{HistoryEntry, HistoryError};

/// Append-only, in-memory log of executed command lines.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `text` under the next index and returns that index.
    pub fn push(&mut self, text: impl Into<String>) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(HistoryEntry {
            index,
            text: text.into(),
        });
        tracing::debug!(index, "history entry recorded");
        index
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn recent(&self, count: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// Follows a `!N` reference to the text it ultimately stands for.
    ///
    /// Lines that are not references come back unchanged. A stored entry
    /// that is itself a reference is followed again; each index may be
    /// visited once per call, so a chain that loops back is reported as
    /// [`HistoryError::Cyclic`] instead of spinning.
    pub fn resolve(&self, line: &str) -> Result<String, HistoryError> {
        let mut visited = BTreeSet::new();
        let mut current = line.to_string();

        while let Some(index) = parse_reference(&current)? {
            if !visited.insert(index) {
                return Err(HistoryError::Cyclic(index));
            }
            let entry = self.get(index).ok_or(HistoryError::NoSuchEntry(index))?;
            tracing::debug!(index, text = %entry.text, "history reference followed");
            current = entry.text.clone();
        }

        Ok(current)
    }
}

/// Returns true when `line` is meant as a `!N` directive, well formed or not.
pub fn is_reference(line: &str) -> bool {
    line.trim_start().starts_with('!')
}

fn parse_reference(line: &str) -> Result<Option<usize>, HistoryError> {
    let trimmed = line.trim();
    let Some(digits) = trimmed.strip_prefix('!') else {
        return Ok(None);
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HistoryError::Malformed(trimmed.to_string()));
    }

    // all digits, so the only failure left is an index too wide for usize
    digits
        .parse::<usize>()
        .map(Some)
        .map_err(|_| HistoryError::Malformed(trimmed.to_string()))
}
