//! OpenHashSet: public set API and load-factor controller over `RawTable`.

use crate::config::HashSetConfig;
use crate::error::Result;
use crate::reentrancy::DebugReentrancy;
use crate::table::{Lookup, RawIter, RawTable};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// A set of unique keys stored inline in one slot array.
///
/// Collisions are resolved by linear probing; removal leaves a tombstone
/// that is reclaimed by the next rehash. The table grows by
/// `growth_factor` whenever an insert would push `len / capacity` past the
/// configured max load factor, and never shrinks.
///
/// ```
/// use open_hashset::OpenHashSet;
///
/// let mut set = OpenHashSet::new();
/// assert!(set.insert(10).unwrap());
/// assert!(!set.insert(10).unwrap());
/// assert!(set.contains(&10));
/// assert!(set.remove(&10));
/// assert_eq!(set.len(), 0);
/// ```
pub struct OpenHashSet<K, S = RandomState> {
    hasher: S,
    table: RawTable<K>,
    config: HashSetConfig,
    reentrancy: DebugReentrancy,
}

impl<K> OpenHashSet<K>
where
    K: Eq + Hash,
{
    /// Empty set with the default configuration (16 slots, max load factor 0.75).
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Empty set with `capacity` slots allocated up front.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(HashSetConfig::default().initial_capacity(capacity))
    }

    /// Empty set that grows once `len / capacity` would exceed `load_factor`.
    pub fn with_max_load_factor(load_factor: f64) -> Result<Self> {
        Self::with_config(HashSetConfig::default().max_load_factor(load_factor))
    }

    pub fn with_config(config: HashSetConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, Default::default())
    }
}

impl<K> Default for OpenHashSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> OpenHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Empty set with the default configuration hashing keys through `hasher`.
    ///
    /// Infallible like `std::collections::HashSet::with_hasher`: the default
    /// table is small and allocated directly, aborting on OOM like `Vec`. Use
    /// `with_config_and_hasher` to get allocation failure back as an error.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        let config = HashSetConfig::default();
        Self {
            hasher,
            table: RawTable::with_capacity(config.effective_capacity()),
            config,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn with_config_and_hasher(config: HashSetConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hasher,
            table: RawTable::try_with_capacity(config.effective_capacity())?,
            config,
            reentrancy: DebugReentrancy::new(),
        })
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.table.live()
    }

    pub fn is_empty(&self) -> bool {
        self.table.live() == 0
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Current `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.live() as f64 / self.table.capacity() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.config.max_load_factor
    }

    pub fn config(&self) -> &HashSetConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.table.tombstones()
    }

    /// Inserts `key`. Returns `Ok(true)` if it was added, `Ok(false)` if an
    /// equal key was already present (the set is left unchanged).
    ///
    /// # Errors
    ///
    /// Returns `HashSetError::AllocationFailed` if the table needs to grow
    /// and the larger slot array cannot be allocated. The set is unchanged
    /// and `key` is dropped.
    pub fn insert(&mut self, key: K) -> Result<bool> {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        loop {
            match self.table.find_or_vacant(hash, |k| *k == key) {
                Lookup::Found(_) => return Ok(false),
                Lookup::Vacant(idx) if self.can_place(idx) => {
                    self.table.place(idx, key, hash);
                    return Ok(true);
                }
                Lookup::Vacant(_) => {
                    let target = self.target_capacity(1);
                    self.table.rehash(target)?
                }
                Lookup::Full => {
                    let grown = self.grown_capacity(self.table.live() + 1);
                    self.table.rehash(grown)?
                }
            }
        }
    }

    /// Membership test.
    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        self.table.find(hash, |k| k.borrow() == q).is_some()
    }

    /// Shared reference to the stored key equal to `q`.
    pub fn get<Q>(&self, q: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let idx = self.table.find(hash, |k| k.borrow() == q)?;
        self.table.key_at(idx)
    }

    /// Removes the key equal to `q`, leaving a tombstone in its slot.
    /// Returns `false` (and changes nothing) if no such key is present.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(q).is_some()
    }

    /// Removes and returns the stored key equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let idx = self.table.find(hash, |k| k.borrow() == q)?;
        self.table.erase(idx)
    }

    /// Makes room for `additional` more inserts without a rehash.
    ///
    /// # Errors
    ///
    /// Returns `HashSetError::AllocationFailed` if the slot array cannot be
    /// allocated; the set is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let _g = self.reentrancy.enter();
        if self.needs_rehash(additional) {
            let target = self.target_capacity(additional);
            self.table.rehash(target)?;
        }
        Ok(())
    }

    /// Removes every key. Capacity is kept.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.table.clear();
    }

    /// Keys in slot order. The order is unspecified and changes on rehash.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            it: self.table.iter(),
        }
    }

    fn exceeds_load(&self, count: usize, capacity: usize) -> bool {
        count as f64 > self.config.max_load_factor * capacity as f64
    }

    // Refilling a tombstone leaves live + tombstones unchanged, so only the
    // live count is held to the load factor.
    fn can_place(&self, idx: usize) -> bool {
        if self.table.is_tombstone(idx) {
            !self.exceeds_load(self.table.live() + 1, self.table.capacity())
        } else {
            !self.needs_rehash(1)
        }
    }

    // Rehash is due when live keys plus tombstones would cross the load
    // factor. Below a max load factor of 1.0 this keeps an `Empty` slot on
    // every probe path.
    fn needs_rehash(&self, additional: usize) -> bool {
        let used = self.table.live() + self.table.tombstones();
        self.exceeds_load(used.saturating_add(additional), self.table.capacity())
    }

    // Grow only if the live keys need it; otherwise rehash in place to
    // purge tombstones.
    fn target_capacity(&self, additional: usize) -> usize {
        let needed = self.table.live().saturating_add(additional);
        if self.exceeds_load(needed, self.table.capacity()) {
            self.grown_capacity(needed)
        } else {
            self.table.capacity()
        }
    }

    /// Smallest `capacity * growth_factor^n` (n >= 1) that holds `needed`
    /// keys within the max load factor. Saturates at `usize::MAX`, which
    /// then fails allocation.
    fn grown_capacity(&self, needed: usize) -> usize {
        let factor = self.config.growth_factor;
        let mut capacity = self.table.capacity().saturating_mul(factor);
        while self.exceeds_load(needed, capacity) && capacity != usize::MAX {
            capacity = capacity.saturating_mul(factor);
        }
        capacity
    }
}

impl<K, S> fmt::Debug for OpenHashSet<K, S>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.iter()).finish()
    }
}

/// Iterator over the keys of an `OpenHashSet`.
pub struct Iter<'a, K> {
    it: RawIter<'a, K>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K, S> IntoIterator for &'a OpenHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
