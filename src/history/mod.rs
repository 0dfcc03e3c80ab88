//! Undo history
//!
//! A bounded stack of edit records, most recent last. Consecutive inserts
//! that continue exactly where the previous one stopped are merged so that
//! typing a word undoes as one unit. Deletes and replaces are never merged.

use crate::buffer::cursor::Span;
use crate::constants;
use std::collections::VecDeque;
use tracing::debug;

// =============================================================================
// Edit Records
// =============================================================================

/// A single reversible edit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditRecord {
    /// `text` was inserted and now occupies `span`
    Insert { span: Span, text: Vec<u8> },

    /// `text` was removed from `span`
    Delete { span: Span, text: Vec<u8> },

    /// `old` was replaced by `new`; `span` covers `new`
    Replace {
        span: Span,
        old: Vec<u8>,
        new: Vec<u8>,
    },
}

impl EditRecord {
    /// Get the record that reverses this one
    #[must_use]
    pub fn inverse(&self) -> EditRecord {
        match self {
            EditRecord::Insert { span, text } => EditRecord::Delete {
                span: *span,
                text: text.clone(),
            },

            EditRecord::Delete { span, text } => EditRecord::Insert {
                span: *span,
                text: text.clone(),
            },

            EditRecord::Replace { span, old, new } => EditRecord::Replace {
                span: Span::new(span.start, span.start + old.len()),
                old: new.clone(),
                new: old.clone(),
            },
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            EditRecord::Insert { span, .. }
            | EditRecord::Delete { span, .. }
            | EditRecord::Replace { span, .. } => *span,
        }
    }

    /// Approximate heap footprint
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        match self {
            EditRecord::Insert { text, .. } | EditRecord::Delete { text, .. } => text.len() + 32,
            EditRecord::Replace { old, new, .. } => old.len() + new.len() + 32,
        }
    }

    /// Describe the record for logs (e.g., "Delete 42 bytes")
    #[must_use]
    pub fn description(&self) -> String {
        let describe = |label: &str, text: &[u8]| {
            if text.len() <= 20 {
                let s = String::from_utf8_lossy(text).replace('\n', "\\n");
                format!("{label} '{s}'")
            } else {
                format!("{label} {} bytes", text.len())
            }
        };
        match self {
            EditRecord::Insert { text, .. } => describe(constants::history::INSERT_LABEL, text),
            EditRecord::Delete { text, .. } => describe(constants::history::DELETE_LABEL, text),
            EditRecord::Replace { old, new, .. } => format!(
                "{} {} bytes with {} bytes",
                constants::history::REPLACE_LABEL,
                old.len(),
                new.len()
            ),
        }
    }
}

// =============================================================================
// Edit History
// =============================================================================

/// Bounded undo stack
#[derive(Clone, Debug)]
pub struct EditHistory {
    records: VecDeque<EditRecord>,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(constants::history::DEFAULT_LIMIT)
    }
}

impl EditHistory {
    /// Create an empty history keeping at most `limit` records
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record that `text` was inserted at `position`.
    ///
    /// Merges into the previous record when it is an insert ending at
    /// `position`.
    pub fn record_insert(&mut self, position: usize, text: &[u8]) {
        if text.is_empty() {
            return;
        }
        if let Some(EditRecord::Insert { span, text: prev }) = self.records.back_mut() {
            if span.end == position {
                prev.extend_from_slice(text);
                span.end += text.len();
                debug!(span_start = span.start, span_end = span.end, "coalesced insert");
                return;
            }
        }
        self.push(EditRecord::Insert {
            span: Span::new(position, position + text.len()),
            text: text.to_vec(),
        });
    }

    /// Record that `text` was removed from `[start, start + text.len())`
    pub fn record_delete(&mut self, start: usize, text: Vec<u8>) {
        if text.is_empty() {
            return;
        }
        self.push(EditRecord::Delete {
            span: Span::new(start, start + text.len()),
            text,
        });
    }

    /// Record that `old` at `start` was replaced by `new`
    pub fn record_replace(&mut self, start: usize, old: Vec<u8>, new: Vec<u8>) {
        if old.is_empty() && new.is_empty() {
            return;
        }
        self.push(EditRecord::Replace {
            span: Span::new(start, start + new.len()),
            old,
            new,
        });
    }

    /// Push a record, evicting the oldest one past the limit
    pub fn push(&mut self, record: EditRecord) {
        self.records.push_back(record);
        while self.records.len() > self.limit {
            if let Some(evicted) = self.records.pop_front() {
                debug!(record = %evicted.description(), "evicted oldest edit record");
            }
        }
    }

    /// Remove and return the most recent record
    pub fn pop(&mut self) -> Option<EditRecord> {
        self.records.pop_back()
    }

    /// Most recent record
    #[must_use]
    pub fn last(&self) -> Option<&EditRecord> {
        self.records.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest records if needed
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        while self.records.len() > self.limit {
            self.records.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &EditRecord> {
        self.records.iter()
    }

    /// Estimated memory held by all records
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        self.records.iter().map(EditRecord::estimated_size).sum()
    }
}
