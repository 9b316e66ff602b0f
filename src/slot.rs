//! Per-slot state of the open-addressing table.

/// One cell of the slot array.
///
/// `Empty` and `Tombstone` are both free for insertion, but only `Empty`
/// ends a probe walk: a tombstone may sit in front of keys that were
/// displaced past it before it was removed.
#[derive(Debug)]
pub(crate) enum Slot<K> {
    Empty,
    Occupied { key: K, hash: u64 },
    Tombstone,
}

impl<K> Slot<K> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }
}
