//! Linear cursor over the question list.

/// Bounded position cursor for the paginated quiz.
///
/// Invariant: `cursor < len` whenever `len > 0`. Movement is by exactly one
/// step and saturates at both ends; hitting a boundary is a no-op, not an
/// error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    cursor: usize,
    len: usize,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.len > 0 && self.cursor < self.len - 1 {
            self.cursor += 1;
        }
    }

    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// True iff the cursor sits on the last valid index. Decides whether the
    /// navigation control reads "Next" or "Submit".
    pub fn is_last(&self) -> bool {
        self.len > 0 && self.cursor == self.len - 1
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
