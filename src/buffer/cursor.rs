//! Conversions between logical offsets and (line, column) cursors

use super::line_index::LineIndex;

/// Half-open logical range `[start, end)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// # Panics
    /// If `start > end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid span [{start}, {end})");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty (start == end)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}

/// A logical offset together with its line and column.
///
/// Always derived from `position`; never edited on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: usize,
    pub line: usize,
    pub col: usize,
}

/// Cursor for logical `position`
///
/// # Panics
/// If `position` is past the end of the indexed text.
#[must_use]
pub fn cursor_from_position(index: &LineIndex, position: usize) -> Cursor {
    let line = index.line_at(position);
    Cursor {
        position,
        line,
        col: position - index.line_start(line),
    }
}

/// Logical offset of the first byte of `line`
///
/// # Panics
/// If `line >= index.line_count()`.
#[must_use]
pub fn position_from_line(index: &LineIndex, line: usize) -> usize {
    index.line_start(line)
}

/// Cursor at column 0 of `line`
#[must_use]
pub fn cursor_from_line(index: &LineIndex, line: usize) -> Cursor {
    cursor_from_position(index, position_from_line(index, line))
}
