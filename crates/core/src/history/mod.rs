//! Address-bar history collaborator.
//!
//! The controller writes the canonical query string through [`History`];
//! back/forward navigation is reported back to it by the embedding shell.

mod memory;

pub use memory::MemoryHistory;

/// How a URL update interacts with the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New entry; back navigation returns to the previous one.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// The browser location, reduced to its query string.
pub trait History: Send {
    /// Current query string without the leading `?`.
    fn current_query(&self) -> String;

    /// Set the current query string.
    fn update(&mut self, query: &str, mode: HistoryMode);
}
