//! Line indexing for Buffer
//! Tracks logical offsets of line starts

use super::gap::GapStore;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Logical offsets of the start of each line, followed by a
    /// `len + 1` sentinel. Always contains at least [0, 1].
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index of an empty document: one empty line
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_starts: vec![0, 1],
        }
    }

    /// Build the index for the current contents of `store`
    #[must_use]
    pub fn build(store: &GapStore) -> Self {
        let mut index = Self::new();
        index.rebuild(store);
        index
    }

    /// Rescan the whole store, skipping the gap.
    ///
    /// LF, CR, CRLF and LFCR all end a line; a two byte pair counts as a
    /// single terminator.
    pub fn rebuild(&mut self, store: &GapStore) {
        self.line_starts.clear();
        self.line_starts.push(0);

        let (before, after) = store.halves();
        let len = before.len() + after.len();
        let byte = |i: usize| {
            if i < before.len() {
                before[i]
            } else {
                after[i - before.len()]
            }
        };

        let mut pos = 0;
        while pos < len {
            let b = byte(pos);
            pos += 1;
            let pair = match b {
                b'\r' => b'\n',
                b'\n' => b'\r',
                _ => continue,
            };
            if pos < len && byte(pos) == pair {
                pos += 1;
            }
            self.line_starts.push(pos);
        }

        self.line_starts.push(len + 1);
        trace!(lines = self.line_count(), len, "rebuilt line index");
    }

    /// Total number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len() - 1
    }

    /// Logical length of the text the index was built from
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.line_starts[self.line_starts.len() - 1] - 1
    }

    /// Logical start of `line`
    ///
    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        assert!(
            line < self.line_count(),
            "line {line} out of bounds (lines: {})",
            self.line_count()
        );
        self.line_starts[line]
    }

    /// Number of bytes on `line`, excluding a one byte terminator.
    ///
    /// The last line has no terminator; the `len + 1` sentinel accounts for
    /// that, so its length is exactly the bytes after its start.
    ///
    /// # Panics
    /// If `line >= line_count()`.
    #[must_use]
    pub fn line_length(&self, line: usize) -> usize {
        let start = self.line_start(line);
        self.line_starts[line + 1] - start - 1
    }

    /// Line containing logical `position` (binary search)
    ///
    /// # Panics
    /// If `position > text_len()`.
    #[must_use]
    pub fn line_at(&self, position: usize) -> usize {
        assert!(
            position <= self.text_len(),
            "position {position} out of bounds (len: {})",
            self.text_len()
        );
        self.line_starts.partition_point(|&start| start <= position) - 1
    }

    /// Raw line starts, sentinel included
    #[must_use]
    pub fn starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
