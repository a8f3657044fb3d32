use tracing::debug;

use super::{History, HistoryMode};

/// In-process history stack with back/forward support.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryHistory {
    /// Start with a single entry, e.g. the query the page was opened with.
    pub fn new(initial_query: &str) -> Self {
        Self {
            entries: vec![strip(initial_query).to_string()],
            cursor: 0,
        }
    }

    /// Step back; returns the query now current, or `None` at the start.
    pub fn back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward; returns the query now current, or `None` at the end.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn current_query(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn update(&mut self, query: &str, mode: HistoryMode) {
        let query = strip(query).to_string();
        debug!(?mode, query = %query, "History update");
        match mode {
            HistoryMode::Push => {
                // Pushing discards any forward entries
                self.entries.truncate(self.cursor + 1);
                self.entries.push(query);
                self.cursor = self.entries.len() - 1;
            }
            HistoryMode::Replace => {
                self.entries[self.cursor] = query;
            }
        }
    }
}

fn strip(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
