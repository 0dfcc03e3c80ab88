//! Gap buffer byte storage
//!
//! Layout of the backing store:
//!
//! ```text
//!  [ before gap | gap (unused) | after gap ]
//!    0..gap_start  gap_start..gap_end  gap_end..size
//! ```
//!
//! Offsets handed to and returned from this type are *logical* (the gap is
//! invisible) unless the name says `physical`.

use tracing::{debug, trace};

/// Byte written into freshly opened gap space
const GAP_FILL: u8 = b'_';

/// Owned byte store with a movable gap
#[derive(Clone)]
pub struct GapStore {
    /// Backing store; its length is the physical size
    storage: Vec<u8>,
    /// Start of gap (end of before-gap text)
    gap_start: usize,
    /// End of gap (start of after-gap text)
    gap_end: usize,
    /// Minimum number of bytes added when the gap must grow
    grow_amount: usize,
}

impl GapStore {
    /// Create an empty store. No memory is reserved until the first insert.
    #[must_use]
    pub fn new(grow_amount: usize) -> Self {
        GapStore {
            storage: Vec::new(),
            gap_start: 0,
            gap_end: 0,
            grow_amount: grow_amount.max(1),
        }
    }

    /// Create a store holding `bytes` with an empty gap at the end
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, grow_amount: usize) -> Self {
        let len = bytes.len();
        GapStore {
            storage: bytes,
            gap_start: len,
            gap_end: len,
            grow_amount: grow_amount.max(1),
        }
    }

    /// Logical length (excluding the gap)
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len() - self.gap_size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical size of the backing store, gap included
    #[must_use]
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    #[must_use]
    pub fn gap_start(&self) -> usize {
        self.gap_start
    }

    #[must_use]
    pub fn gap_end(&self) -> usize {
        self.gap_end
    }

    #[must_use]
    pub fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Map a logical offset to its index in the backing store
    #[must_use]
    pub fn to_physical(&self, position: usize) -> usize {
        if position < self.gap_start {
            position
        } else {
            position + self.gap_size()
        }
    }

    /// Map a physical index outside the gap back to a logical offset
    #[must_use]
    pub fn to_logical(&self, physical: usize) -> usize {
        debug_assert!(
            physical <= self.gap_start || physical >= self.gap_end,
            "physical offset {physical} lies inside gap [{}, {})",
            self.gap_start,
            self.gap_end
        );
        if physical <= self.gap_start {
            physical
        } else {
            physical - self.gap_size()
        }
    }

    /// Byte at logical `position`
    ///
    /// # Panics
    /// If `position >= len()`.
    #[must_use]
    pub fn byte_at(&self, position: usize) -> u8 {
        assert!(
            position < self.len(),
            "position {position} out of bounds (len: {})",
            self.len()
        );
        self.storage[self.to_physical(position)]
    }

    /// Live text before and after the gap
    #[must_use]
    pub fn halves(&self) -> (&[u8], &[u8]) {
        (
            &self.storage[..self.gap_start],
            &self.storage[self.gap_end..],
        )
    }

    /// Make sure at least `min_size` bytes of gap are available
    pub fn ensure_gap(&mut self, min_size: usize) {
        let gap = self.gap_size();
        if gap >= min_size && gap > 0 {
            return;
        }
        let amount = self.grow_amount.max(min_size - gap);
        debug!(
            size = self.storage.len(),
            amount,
            gap_start = self.gap_start,
            "growing gap"
        );
        self.storage.splice(
            self.gap_end..self.gap_end,
            std::iter::repeat(GAP_FILL).take(amount),
        );
        self.gap_end += amount;
        self.check_invariants();
    }

    /// Relocate the gap so that it starts at logical `new_gap_start`
    ///
    /// # Panics
    /// If `new_gap_start > len()`.
    pub fn shift_gap(&mut self, new_gap_start: usize) {
        assert!(
            new_gap_start <= self.len(),
            "gap target {new_gap_start} out of bounds (len: {})",
            self.len()
        );
        let gap = self.gap_size();
        if new_gap_start < self.gap_start {
            // Text in [new, gap_start) slides right to the far side of the gap
            self.storage
                .copy_within(new_gap_start..self.gap_start, new_gap_start + gap);
        } else if new_gap_start > self.gap_start {
            // Text in [gap_end, new + gap) slides left into the gap
            self.storage
                .copy_within(self.gap_end..new_gap_start + gap, self.gap_start);
        } else {
            return;
        }
        trace!(from = self.gap_start, to = new_gap_start, "shifted gap");
        self.gap_start = new_gap_start;
        self.gap_end = new_gap_start + gap;
        self.check_invariants();
    }

    /// Insert `bytes` at logical `position`
    ///
    /// # Panics
    /// If `position > len()`.
    pub fn insert(&mut self, position: usize, bytes: &[u8]) {
        assert!(
            position <= self.len(),
            "insert position {position} out of bounds (len: {})",
            self.len()
        );
        if bytes.is_empty() {
            return;
        }
        self.ensure_gap(bytes.len());
        if self.gap_start != position {
            self.shift_gap(position);
        }
        let end = self.gap_start + bytes.len();
        self.storage[self.gap_start..end].copy_from_slice(bytes);
        self.gap_start = end;
        self.check_invariants();
    }

    /// Remove logical `[start, end)` by absorbing it into the gap
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn delete(&mut self, start: usize, end: usize) {
        assert!(start < end, "invalid delete span [{start}, {end})");
        assert!(
            end <= self.len(),
            "delete end {end} out of bounds (len: {})",
            self.len()
        );
        if self.gap_start != start {
            self.shift_gap(start);
        }
        self.gap_end += end - start;
        self.check_invariants();
    }

    /// Replace logical `[start, end)` with `bytes`
    ///
    /// # Panics
    /// If `start >= end` or `end > len()`.
    pub fn replace(&mut self, start: usize, end: usize, bytes: &[u8]) {
        self.delete(start, end);
        self.insert(start, bytes);
    }

    /// Drop all text, keeping the allocation as gap
    pub fn clear(&mut self) {
        self.gap_start = 0;
        self.gap_end = self.storage.len();
        self.check_invariants();
    }

    /// Copy logical `[start, end)` into a contiguous vector
    ///
    /// # Panics
    /// If `start > end` or `end > len()`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Vec<u8> {
        assert!(start <= end, "invalid span [{start}, {end})");
        assert!(
            end <= self.len(),
            "span end {end} out of bounds (len: {})",
            self.len()
        );
        let (before, after) = self.halves();
        let mut out = Vec::with_capacity(end - start);
        if start < before.len() {
            out.extend_from_slice(&before[start..end.min(before.len())]);
        }
        if end > before.len() {
            let from = start.max(before.len()) - before.len();
            out.extend_from_slice(&after[from..end - before.len()]);
        }
        out
    }

    /// Whole logical text as one contiguous vector
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let (before, after) = self.halves();
        let mut out = Vec::with_capacity(before.len() + after.len());
        out.extend_from_slice(before);
        out.extend_from_slice(after);
        out
    }

    fn check_invariants(&self) {
        debug_assert!(self.gap_start <= self.gap_end);
        debug_assert!(self.gap_end <= self.storage.len());
    }
}

impl std::fmt::Debug for GapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapStore")
            .field("len", &self.len())
            .field("size", &self.size())
            .field("gap_start", &self.gap_start)
            .field("gap_end", &self.gap_end)
            .finish()
    }
}
