use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::{AiRequest, Operation, Outcome};

/// How many answers the history keeps.
pub const HISTORY_LIMIT: usize = 8;

/// One AI answer as shown in the history list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub operation: Operation,
    pub file_path: String,
    /// Code the request was made for; a rewrite or comment applies to it.
    pub code: String,
    pub outcome: Outcome,
}

impl HistoryEntry {
    pub fn title(&self) -> &'static str {
        self.outcome.title()
    }
}

/// Most recent AI answers, newest first.
#[derive(Debug, Default)]
pub struct AiHistory {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

impl AiHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer stamped with the current time.
    pub fn record(&mut self, request: &AiRequest, outcome: Outcome) -> &HistoryEntry {
        self.record_at(request, outcome, Utc::now())
    }

    /// Records an answer; the oldest entry is dropped past [`HISTORY_LIMIT`].
    pub fn record_at(
        &mut self,
        request: &AiRequest,
        outcome: Outcome,
        created_at: DateTime<Utc>,
    ) -> &HistoryEntry {
        self.next_id += 1;
        self.entries.push_front(HistoryEntry {
            id: self.next_id,
            created_at,
            operation: request.operation,
            file_path: request.file_path.clone(),
            code: request.code.clone(),
            outcome,
        });
        self.entries.truncate(HISTORY_LIMIT);
        &self.entries[0]
    }

    /// Looks an entry up to show it again.
    pub fn select(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
