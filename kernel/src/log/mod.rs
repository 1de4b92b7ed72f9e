use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Position of an entry in the admin log, starting at 1.
pub type Sequence = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminAction {
    Added,
    Updated,
    Deleted,
    Note,
}

/// Immutable record of one administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLogEntry {
    pub sequence: Sequence,
    pub action: AdminAction,
    pub message: String,
}

/// Append-only audit trail, newest entry first.
#[derive(Debug, Default)]
pub struct AdminLog {
    entries: VecDeque<AdminLogEntry>,
}

impl AdminLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn append(&mut self, action: AdminAction, message: String) -> &AdminLogEntry {
        let sequence = self.current_sequence() + 1;
        self.entries.push_front(AdminLogEntry {
            sequence,
            action,
            message,
        });
        &self.entries[0]
    }

    /// Entries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &AdminLogEntry> {
        self.entries.iter()
    }

    pub fn current_sequence(&self) -> Sequence {
        self.entries.front().map(|e| e.sequence).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
