//! open-hashset: a single-threaded hash set built on open addressing with
//! linear probing and tombstone deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an O(1) amortized "have I seen this key before" container whose
//!   whole state is one contiguous slot array, with no per-entry heap
//!   allocation and no linked structure.
//! - Layers:
//!   - `Slot<K>`: `Empty` / `Occupied { key, hash }` / `Tombstone`. Three
//!     states because a probe walk must stop at never-used slots but step
//!     over removed ones.
//!   - `ProbeSeq`: home index `hash mod capacity`, then `+1` with
//!     wrap-around, bounded to one lap of the table.
//!   - `RawTable<K>`: slot array plus live/tombstone counters. Finds,
//!     places, erases and rehashes by precomputed hash; never hashes keys.
//!   - `OpenHashSet<K, S>`: public API. Hashes through `S: BuildHasher`
//!     and owns the load-factor policy deciding when `RawTable` rehashes.
//!
//! Constraints
//! - Single-threaded: `!Sync`; `Send` so callers can put it behind a
//!   `Mutex`.
//! - Unique keys; duplicate inserts return `Ok(false)` and change nothing.
//! - After every public operation `len / capacity <= max_load_factor`.
//! - Capacity never shrinks; `remove` and `clear` keep the slot array.
//!
//! Load factor and rehashing
//! - Insert checks the duplicate first, then rehashes only if placing a
//!   new key would push live keys plus tombstones past the max load factor.
//!   Refilling a tombstone does not add a used slot and is checked against
//!   live keys alone.
//! - If live keys alone need more room the table grows by `growth_factor`
//!   (repeatedly, until the new key fits); otherwise it is rebuilt at the
//!   same capacity, which clears tombstones left by insert/remove churn.
//! - Rehash allocates the new array first (`try_reserve_exact`) and only
//!   then moves keys, so an allocation failure returns
//!   `HashSetError::AllocationFailed` with the set untouched.
//! - Each occupied slot stores its `u64` hash; rehashing reuses it and
//!   never calls `K: Hash`.
//!
//! Reentrancy
//! - `K: Eq` runs during probing. A debug-only guard on every public entry
//!   point panics if that code re-enters the same set.
//!
//! Notes and non-goals
//! - Iteration order is slot order: unspecified, and it changes on rehash.
//! - No shrink-on-remove, no persistence, no internal locking.

mod config;
mod error;
mod hash_set;
mod hash_set_proptest;
mod hasher;
mod probe;
mod reentrancy;
mod slot;
mod table;

// Public surface
pub use config::{
    HashSetConfig, DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR,
};
pub use error::{HashSetError, Result};
pub use hash_set::{Iter, OpenHashSet};
pub use hasher::{BuildIdentityHasher, IdentityHasher};
