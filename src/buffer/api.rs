//! Buffer abstraction layer
//!
//! Rendering and command collaborators read a document through
//! [`BufferView`] and never see gap internals.
//!
//! ## Indexing model
//!
//! All offsets are **byte** based logical offsets: the gap is invisible and
//! every line terminator inside the buffer is a single `\n`. Nothing here is
//! grapheme or code-point aware.
//!
//! ## Revision semantics
//!
//! Revision increments on every text mutation, including undo. Pure
//! queries and cursor conversions never change it.

/// Read-only view of a document.
pub trait BufferView {
    /// Total number of bytes in the document.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of logical lines (an empty document has one).
    fn line_count(&self) -> usize;

    /// Byte offset of the start of `line` (0-based).
    fn line_start(&self, line: usize) -> usize;

    /// Bytes on `line`, excluding its terminator.
    fn line_length(&self, line: usize) -> usize;

    /// Offset one past the last byte of `line`, before its terminator.
    fn line_end(&self, line: usize) -> usize {
        self.line_start(line) + self.line_length(line)
    }

    /// Byte at `position`; `position` must be below `len()`.
    fn char_at(&self, position: usize) -> u8;

    /// Revision identifier; increments on text mutations.
    fn revision(&self) -> u64;
}
