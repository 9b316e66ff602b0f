//! Home index and linear probe sequence.

/// `hash mod capacity`.
#[inline]
pub(crate) fn home_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

/// Linear probe order starting at the home index: `h, h+1, h+2, ...`
/// modulo `capacity`. Yields every slot exactly once, then stops, so a walk
/// over a table with no `Empty` slot still terminates.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    pos: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        Self {
            pos: home_index(hash, capacity),
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.pos;
        self.pos += 1;
        if self.pos == self.capacity {
            self.pos = 0;
        }
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
