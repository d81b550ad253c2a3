//! # History Stack
//!
//! Back-navigation history. The stack is never empty: it is created with the
//! startup entry and refuses to pop its last entry, so "the top entry is the
//! current screen" always has an answer.

use super::context::NavigationContext;
use super::screen::ScreenId;
use serde::{Deserialize, Serialize};

/// One step of navigation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    screen: ScreenId,
    context: NavigationContext,
}

impl HistoryEntry {
    pub fn new(screen: ScreenId, context: NavigationContext) -> Self {
        Self { screen, context }
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }
}

/// Non-empty navigation history, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

/// Error for restoring a history with no entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation history must contain at least one entry")]
pub struct EmptyHistory;

impl TryFrom<Vec<HistoryEntry>> for HistoryStack {
    type Error = EmptyHistory;

    fn try_from(entries: Vec<HistoryEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(EmptyHistory);
        }
        Ok(Self { entries })
    }
}

impl From<HistoryStack> for Vec<HistoryEntry> {
    fn from(stack: HistoryStack) -> Self {
        stack.entries
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(HistoryEntry::new(ScreenId::DEFAULT, NavigationContext::new()))
    }
}

impl HistoryStack {
    /// Create a stack holding only `initial`
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    /// Current (most recent) entry
    pub fn top(&self) -> &HistoryEntry {
        // Construction rejects an empty vector and `pop` keeps at least one.
        &self.entries[self.entries.len() - 1]
    }

    /// Entry beneath the top, if any
    pub fn below_top(&self) -> Option<&HistoryEntry> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }

    /// Number of entries (always >= 1)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; provided for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a back navigation would change anything
    pub fn can_pop(&self) -> bool {
        self.entries.len() > 1
    }

    /// Push a new top entry
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove the top entry, unless it is the last one.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        if self.can_pop() {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Swap the top entry for `entry`, returning the old top
    pub fn replace_top(&mut self, entry: HistoryEntry) -> HistoryEntry {
        let last = self.entries.len() - 1;
        std::mem::replace(&mut self.entries[last], entry)
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Screen ids, oldest first
    pub fn screens(&self) -> Vec<ScreenId> {
        self.entries.iter().map(HistoryEntry::screen).collect()
    }
}
