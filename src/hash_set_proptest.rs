#![cfg(test)]

// Property tests for OpenHashSet kept inside the crate so they can check
// table internals (tombstone accounting, capacity history) alongside the
// public behavior.

use crate::config::HashSetConfig;
use crate::hash_set::OpenHashSet;
use crate::hasher::BuildIdentityHasher;
use core::hash::{BuildHasher, Hash, Hasher};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Take(usize),
    Contains(String),
    Reserve(usize),
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Insert),
            3 => idx.clone().prop_map(Op::Remove),
            1 => idx.clone().prop_map(Op::Take),
            3 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
            1 => (0usize..32).prop_map(Op::Reserve),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = HashSetConfig> {
    (1usize..=20, prop_oneof![Just(0.5), Just(0.75), Just(1.0)], 2usize..=4).prop_map(
        |(cap, lf, gf)| {
            HashSetConfig::default()
                .initial_capacity(cap)
                .max_load_factor(lf)
                .growth_factor(gf)
        },
    )
}

// Runs `ops` against the set and a std HashSet model. After every op:
// - `len`/`is_empty` match the model and every model key is found.
// - `len / capacity <= max_load_factor`.
// - Capacity never decreases.
// - Live keys plus tombstones never exceed capacity.
fn run_state_machine<S>(
    mut sut: OpenHashSet<Key, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashSet<Key> = HashSet::new();
    let mut last_capacity = sut.capacity();

    for op in ops {
        match op {
            Op::Insert(i) => {
                let k = key_from(pool, i);
                let already = model.contains(&k);
                let inserted = sut.insert(k.clone()).expect("allocation");
                prop_assert_eq!(inserted, !already, "insert result must reflect prior absence");
                model.insert(k);
            }
            Op::Remove(i) => {
                let k = key_from(pool, i);
                let before = sut.len();
                let removed = sut.remove(&k);
                prop_assert_eq!(removed, model.remove(&k));
                if !removed {
                    prop_assert_eq!(sut.len(), before, "absent remove must not change len");
                }
                prop_assert!(!sut.contains(&k));
            }
            Op::Take(i) => {
                let k = key_from(pool, i);
                let taken = sut.take(k.0.as_str());
                prop_assert_eq!(taken.is_some(), model.remove(&k));
                if let Some(t) = taken {
                    prop_assert_eq!(t, k);
                }
            }
            Op::Contains(s) => {
                let has_model = model.iter().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
                prop_assert_eq!(sut.get(s.as_str()).is_some(), has_model);
            }
            Op::Reserve(n) => {
                sut.reserve(n).expect("allocation");
                let cap = sut.capacity();
                // The next `n` fresh inserts must fit without growing.
                prop_assert!((sut.len() + n) as f64 <= sut.max_load_factor() * cap as f64);
            }
            Op::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
                prop_assert_eq!(sut.tombstones(), 0);
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(sut.iter().count(), model.len(), "iter yields each key once");
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        for k in &model {
            prop_assert!(sut.contains(k), "missing {:?}", k);
        }
        prop_assert!(sut.load_factor() <= sut.max_load_factor());
        prop_assert!(sut.capacity() >= last_capacity, "capacity must not shrink");
        prop_assert!(sut.len() + sut.tombstones() <= sut.capacity());
        last_capacity = sut.capacity();
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet
// across random sizing configurations, with the default hasher.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), config in arb_config()) {
        let sut: OpenHashSet<Key> = OpenHashSet::with_config(config).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one probe
// cluster, so removal leaves tombstones in the middle of live runs.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), config in arb_config()) {
        let sut = OpenHashSet::with_config_and_hasher(config, ConstBuildHasher).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: integer keys under the identity hasher. Every inserted key stays
// searchable through any number of resizes; removed keys never reappear.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_identity_hash_resize_keeps_keys(
        keys in proptest::collection::vec(0u64..512, 0..300),
        removals in proptest::collection::vec(0u64..512, 0..100),
        config in arb_config(),
    ) {
        let mut sut: OpenHashSet<u64, BuildIdentityHasher> =
            OpenHashSet::with_config_and_hasher(config, BuildIdentityHasher::default()).unwrap();
        let mut model = BTreeSet::new();
        for &k in &keys {
            prop_assert_eq!(sut.insert(k).unwrap(), model.insert(k));
        }
        for &k in &removals {
            prop_assert_eq!(sut.remove(&k), model.remove(&k));
        }
        prop_assert_eq!(sut.len(), model.len());
        for k in 0u64..512 {
            prop_assert_eq!(sut.contains(&k), model.contains(&k));
        }
    }
}

// Borrowed `&str` lookups only work if the newtype hashes like its string.
#[test]
fn key_newtype_hashes_like_str() {
    let b = std::collections::hash_map::RandomState::new();
    let k = Key("abc".to_string());
    let mut h1 = b.build_hasher();
    k.hash(&mut h1);
    let mut h2 = b.build_hasher();
    "abc".hash(&mut h2);
    assert_eq!(h1.finish(), h2.finish());
}
