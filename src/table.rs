//! RawTable: slot storage, probing and rehash, keyed by precomputed hashes.
//!
//! This layer never hashes keys. Callers pass the `u64` hash and an equality
//! predicate; each occupied slot keeps the hash it was inserted with so that
//! rehashing only moves slots and never calls back into user code. Load
//! factor policy lives one level up in `OpenHashSet`.

use crate::error::{HashSetError, Result};
use crate::probe::ProbeSeq;
use crate::slot::Slot;
use log::{debug, trace};

/// Outcome of a probe walk for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// The key is already stored at this index.
    Found(usize),
    /// Key absent; first free slot (tombstone or empty) on its probe path.
    Vacant(usize),
    /// Key absent and every slot is occupied.
    Full,
}

#[derive(Debug)]
pub(crate) struct RawTable<K> {
    slots: Vec<Slot<K>>,
    live: usize,
    tombstones: usize,
    #[cfg(test)]
    rehashes: usize,
}

impl<K> RawTable<K> {
    /// Allocate `capacity` empty slots, aborting on OOM like `Vec`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: core::iter::repeat_with(|| Slot::Empty).take(capacity).collect(),
            live: 0,
            tombstones: 0,
            #[cfg(test)]
            rehashes: 0,
        }
    }

    /// Allocate `capacity` empty slots, reporting allocation failure.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: Self::alloc_slots(capacity)?,
            live: 0,
            tombstones: 0,
            #[cfg(test)]
            rehashes: 0,
        })
    }

    fn alloc_slots(capacity: usize) -> Result<Vec<Slot<K>>> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| HashSetError::AllocationFailed {
                requested: capacity,
                source,
            })?;
        slots.resize_with(capacity, || Slot::Empty);
        Ok(slots)
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Index of the slot holding a key equal under `eq`, if any.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied { key, hash: h } if *h == hash && eq(key) => return Some(idx),
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
        }
        trace!("probe for {hash:#x} exhausted {} slots", self.capacity());
        None
    }

    /// Walk the probe path to the first `Empty` slot, remembering the first
    /// free slot seen. Duplicates can only live before that `Empty`.
    pub(crate) fn find_or_vacant(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Lookup {
        let mut first_free = None;
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return Lookup::Vacant(first_free.unwrap_or(idx)),
                Slot::Tombstone => {
                    first_free.get_or_insert(idx);
                }
                Slot::Occupied { key, hash: h } => {
                    if *h == hash && eq(key) {
                        return Lookup::Found(idx);
                    }
                }
            }
        }
        trace!("insert probe for {hash:#x} exhausted {} slots", self.capacity());
        match first_free {
            Some(idx) => Lookup::Vacant(idx),
            None => Lookup::Full,
        }
    }

    /// Store `key` in the free slot at `idx` (as returned by `Lookup::Vacant`).
    pub(crate) fn place(&mut self, idx: usize, key: K, hash: u64) {
        let prev = core::mem::replace(&mut self.slots[idx], Slot::Occupied { key, hash });
        match prev {
            Slot::Empty => {}
            Slot::Tombstone => self.tombstones -= 1,
            Slot::Occupied { .. } => unreachable!("place() into an occupied slot"),
        }
        self.live += 1;
    }

    /// Replace the occupied slot at `idx` with a tombstone and return its key.
    pub(crate) fn erase(&mut self, idx: usize) -> Option<K> {
        match core::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied { key, .. } => {
                self.live -= 1;
                self.tombstones += 1;
                Some(key)
            }
            other => {
                self.slots[idx] = other;
                None
            }
        }
    }

    #[inline]
    pub(crate) fn is_tombstone(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(Slot::is_tombstone)
    }

    #[cfg(test)]
    pub(crate) fn rehashes(&self) -> usize {
        self.rehashes
    }

    #[inline]
    pub(crate) fn key_at(&self, idx: usize) -> Option<&K> {
        self.slots.get(idx).and_then(Slot::key)
    }

    /// Move every live key into a fresh array of `new_capacity` slots and
    /// drop all tombstones. The current table is untouched if allocation
    /// fails.
    pub(crate) fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity > self.live);
        let mut slots = Self::alloc_slots(new_capacity)?;
        let old_capacity = self.capacity();
        let purged = self.tombstones;

        for slot in core::mem::take(&mut self.slots) {
            if let Slot::Occupied { key, hash } = slot {
                let idx = ProbeSeq::new(hash, new_capacity)
                    .find(|&i| slots[i].is_empty())
                    .expect("rehash target has a free slot for every live key");
                slots[idx] = Slot::Occupied { key, hash };
            }
        }

        self.slots = slots;
        self.tombstones = 0;
        #[cfg(test)]
        {
            self.rehashes += 1;
        }
        debug!(
            "rehash: capacity {} -> {}, {} live, {} tombstones purged",
            old_capacity, new_capacity, self.live, purged
        );
        Ok(())
    }

    /// Reset every slot to `Empty`; capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = Slot::Empty);
        self.live = 0;
        self.tombstones = 0;
    }

    pub(crate) fn iter(&self) -> RawIter<'_, K> {
        RawIter {
            it: self.slots.iter(),
            remaining: self.live,
        }
    }
}

pub(crate) struct RawIter<'a, K> {
    it: core::slice::Iter<'a, Slot<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for RawIter<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        let key = self.it.find_map(Slot::key)?;
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for RawIter<'_, K> {}
