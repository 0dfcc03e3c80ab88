//! Text buffer backed by a gap buffer
//!
//! `Buffer` owns the byte store, the line index derived from it, the line
//! ending found on disk and the undo history. Text inside is always
//! LF-normalized; the disk convention is re-applied only on export.
//!
//! Every mutation rebuilds the line index before returning. Offsets and
//! spans passed in are preconditions: out of range values panic rather
//! than being clamped. The `try_*` variants check first and return a
//! [`GapError`] instead.

use crate::buffer::api::BufferView;
use crate::error::{GapError, Result};
use crate::history::{EditHistory, EditRecord};
use crate::settings::BufferOptions;
use std::fmt::{self, Display};
use std::time::SystemTime;
use tracing::debug;

pub mod api;
pub mod cursor;
pub mod gap;
pub mod line_ending;
pub mod line_index;

use cursor::{Cursor, Span};
use gap::GapStore;
use line_ending::LineEnding;
use line_index::LineIndex;

/// An editable document held in memory
#[derive(Clone, Debug)]
pub struct Buffer {
    /// Name shown to the user, usually the file name
    name: String,
    store: GapStore,
    line_index: LineIndex,
    /// Convention re-applied when exporting
    line_ending: LineEnding,
    history: EditHistory,
    /// Monotonic revision counter, bumped on every mutation
    revision: u64,
    /// Modification time of the file the text came from
    last_write_time: Option<SystemTime>,
}

impl Buffer {
    /// Create an empty buffer with default options
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, &BufferOptions::default())
    }

    /// Create an empty buffer
    #[must_use]
    pub fn with_options(name: impl Into<String>, options: &BufferOptions) -> Self {
        let store = GapStore::new(options.grow_amount);
        Buffer {
            name: name.into(),
            line_index: LineIndex::build(&store),
            store,
            line_ending: options.default_line_ending,
            history: EditHistory::new(options.history_limit),
            revision: 0,
            last_write_time: None,
        }
    }

    /// Create a buffer from raw file bytes with default options
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::from_bytes_with_options(name, bytes, &BufferOptions::default())
    }

    /// Create a buffer from raw file bytes.
    ///
    /// The line ending is detected from the first terminator and every
    /// CRLF or lone CR is stored as LF.
    #[must_use]
    pub fn from_bytes_with_options(
        name: impl Into<String>,
        bytes: &[u8],
        options: &BufferOptions,
    ) -> Self {
        let line_ending = LineEnding::detect(bytes);
        let store = GapStore::from_bytes(line_ending::normalize(bytes), options.grow_amount);
        let buffer = Buffer {
            name: name.into(),
            line_index: LineIndex::build(&store),
            store,
            line_ending,
            history: EditHistory::new(options.history_limit),
            revision: 0,
            last_write_time: None,
        };
        debug!(
            name = %buffer.name,
            len = buffer.len(),
            lines = buffer.line_count(),
            line_ending = %line_ending,
            "loaded buffer"
        );
        buffer
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    #[must_use]
    pub fn last_write_time(&self) -> Option<SystemTime> {
        self.last_write_time
    }

    pub fn set_last_write_time(&mut self, time: Option<SystemTime>) {
        self.last_write_time = time;
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Logical length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Bytes on `line`, excluding its terminator
    ///
    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn line_length(&self, line: usize) -> usize {
        self.line_index.line_length(line)
    }

    /// Byte at `position`
    ///
    /// # Panics
    /// If `position >= len()`.
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.store.byte_at(position)
    }

    /// Line start offsets followed by the `len + 1` sentinel
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        self.line_index.starts()
    }

    #[must_use]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut EditHistory {
        &mut self.history
    }

    // -------------------------------------------------------------------------
    // Cursor helpers
    // -------------------------------------------------------------------------

    /// # Panics
    /// If `position > len()`.
    #[must_use]
    pub fn cursor_from_position(&self, position: usize) -> Cursor {
        cursor::cursor_from_position(&self.line_index, position)
    }

    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn position_from_line(&self, line: usize) -> usize {
        cursor::position_from_line(&self.line_index, line)
    }

    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn cursor_from_line(&self, line: usize) -> Cursor {
        cursor::cursor_from_line(&self.line_index, line)
    }

    // -------------------------------------------------------------------------
    // Raw mutations (not recorded in history)
    // -------------------------------------------------------------------------

    pub fn insert_single(&mut self, position: usize, byte: u8) {
        self.insert_text(position, &[byte]);
    }

    /// Insert `text` at `position`
    ///
    /// # Panics
    /// If `position > len()`.
    pub fn insert_text(&mut self, position: usize, text: &[u8]) {
        if text.is_empty() {
            assert!(
                position <= self.len(),
                "insert position {position} out of bounds (len: {})",
                self.len()
            );
            return;
        }
        self.store.insert(position, text);
        self.after_mutation();
    }

    /// Checked [`Buffer::insert_text`]
    pub fn try_insert_text(&mut self, position: usize, text: &[u8]) -> Result<()> {
        if position > self.len() {
            return Err(GapError::out_of_range("Insert position", position, self.len()));
        }
        self.insert_text(position, text);
        Ok(())
    }

    /// Delete the byte at `position`
    ///
    /// # Panics
    /// If `position >= len()`.
    pub fn delete_single(&mut self, position: usize) {
        self.delete_region(position, position + 1);
    }

    /// Delete `[start, end)`
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn delete_region(&mut self, start: usize, end: usize) {
        self.store.delete(start, end);
        self.after_mutation();
    }

    /// Checked [`Buffer::delete_region`]
    pub fn try_delete_region(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_region(start, end)?;
        self.delete_region(start, end);
        Ok(())
    }

    /// Replace `[start, end)` with `text`
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn replace_region(&mut self, text: &[u8], start: usize, end: usize) {
        self.store.replace(start, end, text);
        self.after_mutation();
    }

    /// Checked [`Buffer::replace_region`]
    pub fn try_replace_region(&mut self, text: &[u8], start: usize, end: usize) -> Result<()> {
        self.check_region(start, end)?;
        self.replace_region(text, start, end);
        Ok(())
    }

    /// Remove all text and forget the undo history
    pub fn clear(&mut self) {
        self.store.clear();
        self.history.clear();
        self.after_mutation();
    }

    fn check_region(&self, start: usize, end: usize) -> Result<()> {
        if start >= end {
            return Err(GapError::invalid_span(start, end));
        }
        if end > self.len() {
            return Err(GapError::out_of_range("Span end", end, self.len()));
        }
        Ok(())
    }

    fn after_mutation(&mut self) {
        self.line_index.rebuild(&self.store);
        self.revision += 1;
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Record an insert of `text` at `position` that the caller performs
    pub fn record_insert(&mut self, position: usize, text: &[u8]) {
        self.history.record_insert(position, text);
    }

    /// Record a delete of `[start, end)`; call before the text is removed
    ///
    /// # Panics
    /// If `start > end` or `end > len()`.
    pub fn record_delete(&mut self, start: usize, end: usize) {
        let text = self.store.slice(start, end);
        self.history.record_delete(start, text);
    }

    /// Insert `text` at `position` and record it. Returns the cursor just
    /// past the inserted text.
    ///
    /// # Panics
    /// If `position > len()`.
    pub fn insert(&mut self, position: usize, text: &[u8]) -> Cursor {
        self.insert_text(position, text);
        self.history.record_insert(position, text);
        self.cursor_from_position(position + text.len())
    }

    /// Delete `[start, end)` and record it. Returns the cursor at `start`.
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn delete(&mut self, start: usize, end: usize) -> Cursor {
        self.record_delete(start, end);
        self.delete_region(start, end);
        self.cursor_from_position(start)
    }

    /// Replace `[start, end)` with `text` and record it as one edit.
    /// Returns the cursor just past the new text.
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn replace(&mut self, text: &[u8], start: usize, end: usize) -> Cursor {
        let old = self.store.slice(start, end);
        self.replace_region(text, start, end);
        self.history.record_replace(start, old, text.to_vec());
        self.cursor_from_position(start + text.len())
    }

    /// Revert the most recent recorded edit.
    ///
    /// Returns where the cursor belongs afterwards, or `None` (leaving the
    /// buffer untouched) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Cursor> {
        let record = self.history.pop()?;
        debug!(record = %record.description(), "undo");
        Some(self.apply(&record.inverse()))
    }

    /// Apply `record` without recording it
    fn apply(&mut self, record: &EditRecord) -> Cursor {
        match record {
            EditRecord::Insert { span, text } => {
                self.insert_text(span.start, text);
                self.cursor_from_position(span.end)
            }
            EditRecord::Delete { span, .. } => {
                self.delete_region(span.start, span.end);
                self.cursor_from_position(span.start)
            }
            EditRecord::Replace { span, old, new } => {
                let end = span.start + old.len();
                if end > span.start {
                    self.replace_region(new, span.start, end);
                } else {
                    self.insert_text(span.start, new);
                }
                self.cursor_from_position(span.end)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Materialization
    // -------------------------------------------------------------------------

    /// Whole text as contiguous LF-normalized bytes
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.store.to_vec()
    }

    /// Bytes in `span`
    ///
    /// # Panics
    /// If `span.end > len()`.
    #[must_use]
    pub fn bytes_span(&self, span: Span) -> Vec<u8> {
        self.store.slice(span.start, span.end)
    }

    /// Text in `span`, lossily decoded
    #[must_use]
    pub fn to_string_span(&self, span: Span) -> String {
        String::from_utf8_lossy(&self.bytes_span(span)).into_owned()
    }

    /// Text of `line` without its terminator
    ///
    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn line_text(&self, line: usize) -> String {
        let start = self.position_from_line(line);
        self.to_string_span(Span::new(start, start + self.line_length(line)))
    }

    /// Bytes to persist: every LF expanded to the buffer's line ending
    #[must_use]
    pub fn to_bytes_apply_line_endings(&self) -> Vec<u8> {
        line_ending::apply(&self.to_bytes(), self.line_ending)
    }

    #[must_use]
    pub fn to_string_apply_line_endings(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes_apply_line_endings()).into_owned()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(crate::constants::buffer::NO_NAME)
    }
}

impl Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.store.to_vec()))
    }
}

impl BufferView for Buffer {
    fn len(&self) -> usize {
        self.len()
    }

    fn line_count(&self) -> usize {
        self.line_count()
    }

    fn line_start(&self, line: usize) -> usize {
        self.position_from_line(line)
    }

    fn line_length(&self, line: usize) -> usize {
        self.line_length(line)
    }

    fn char_at(&self, position: usize) -> u8 {
        self.char_at(position)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
