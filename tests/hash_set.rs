// OpenHashSet scenario tests.
//
// Each test documents the behavior being verified. The core invariants
// exercised:
// - Uniqueness: a second insert of the same key returns false and leaves
//   len unchanged.
// - Round-trip: an inserted key is found until it is removed.
// - Tombstone transparency: removing one key of a probe cluster keeps the
//   others reachable.
// - Resize correctness: growth keeps every key and len intact.
// - Idempotent removal: removing an absent key is a no-op returning false.
use open_hashset::{BuildIdentityHasher, HashSetConfig, HashSetError, OpenHashSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault};
use std::sync::{Arc, Mutex};

// Test: insert three keys, search hits and a miss.
// Verifies: each fresh insert is true, duplicate is false.
#[test]
fn insert_and_search() {
    let mut set = OpenHashSet::new();
    assert!(set.insert(10).unwrap());
    assert!(set.insert(20).unwrap());
    assert!(set.insert(30).unwrap());
    assert!(!set.insert(10).unwrap(), "duplicate");

    assert!(set.contains(&10));
    assert!(set.contains(&20));
    assert!(set.contains(&30));
    assert!(!set.contains(&40));
    assert_eq!(set.len(), 3);
}

// Test: remove a present key and an absent one.
// Verifies: removed key is no longer found; absent remove returns false
// without touching len.
#[test]
fn remove_present_and_absent() {
    let mut set = OpenHashSet::new();
    for k in [10, 20, 30] {
        set.insert(k).unwrap();
    }

    assert!(set.remove(&20));
    assert!(!set.contains(&20));
    assert_eq!(set.len(), 2);

    assert!(!set.remove(&40));
    assert!(!set.remove(&20), "second remove of the same key");
    assert_eq!(set.len(), 2);
    assert!(set.contains(&10) && set.contains(&30));
}

// Test: a low max load factor forces growth while inserting 1..=50.
// Verifies: capacity grew and every key survived the resizes.
#[test]
fn resize_with_low_load_factor() {
    let mut set = OpenHashSet::with_max_load_factor(0.5).unwrap();
    let initial = set.capacity();
    for i in 1..=50 {
        assert!(set.insert(i).unwrap());
    }

    assert!(set.contains(&25));
    assert!(set.contains(&50));
    assert!(!set.contains(&100));
    assert!(set.capacity() > initial, "at least one resize");
    assert!(set.load_factor() <= 0.5);
    assert_eq!(set.len(), 50);
}

// Test: operations on an empty set.
#[test]
fn empty_set_edge_cases() {
    let mut set: OpenHashSet<i32> = OpenHashSet::new();
    assert!(set.is_empty());
    assert!(!set.remove(&99));
    assert!(!set.contains(&1000));
    assert_eq!(set.iter().next(), None);
}

// Test: 10 and 21 share home slot 10 in an 11-slot table under the
// identity hash.
// Verifies: both colliding keys are insertable and searchable, and the
// second stays reachable after the first is removed.
#[test]
fn collision_handling() {
    let config = HashSetConfig::default().initial_capacity(11);
    let mut set: OpenHashSet<i32, BuildIdentityHasher> =
        OpenHashSet::with_config_and_hasher(config, BuildIdentityHasher::default()).unwrap();
    let b = set.hasher();
    assert_eq!(b.hash_one(10) % 11, b.hash_one(21) % 11);

    assert!(set.insert(10).unwrap());
    assert!(set.insert(21).unwrap());
    assert!(set.contains(&10));
    assert!(set.contains(&21));

    assert!(set.remove(&10));
    assert!(set.contains(&21), "tombstone must not hide the displaced key");
}

// Test: 100k sequential integers.
// Verifies: len and every lookup after many resizes.
#[test]
fn large_dataset() {
    const N: i32 = 100_000;
    let mut set = OpenHashSet::new();
    for i in 0..N {
        assert!(set.insert(i).unwrap());
    }
    for i in 0..N {
        assert!(set.contains(&i), "missing {i}");
    }
    assert_eq!(set.len(), N as usize);
    assert!(!set.contains(&N));
}

// Test: same workload through the identity hasher, where sequential keys
// fill consecutive slots.
#[test]
fn large_dataset_identity_hash() {
    const N: u64 = 100_000;
    let mut set: OpenHashSet<u64, BuildIdentityHasher> = OpenHashSet::with_hasher(Default::default());
    for i in 0..N {
        set.insert(i).unwrap();
    }
    assert_eq!(set.len(), N as usize);
    assert!((0..N).all(|i| set.contains(&i)));
    for i in (0..N).step_by(2) {
        assert!(set.remove(&i));
    }
    assert_eq!(set.len(), (N / 2) as usize);
    assert!((0..N).all(|i| set.contains(&i) == (i % 2 == 1)));
}

// Test: remove then reinsert the same key.
// Verifies: the key comes back and len is restored.
#[test]
fn remove_then_reinsert() {
    let mut set = OpenHashSet::new();
    set.insert("k".to_string()).unwrap();
    assert!(set.remove("k"));
    assert!(!set.contains("k"));
    assert!(set.insert("k".to_string()).unwrap());
    assert!(set.contains("k"));
    assert_eq!(set.len(), 1);
}

// Test: clear empties without shrinking.
#[test]
fn clear_keeps_capacity() {
    let mut set = OpenHashSet::new();
    for i in 0..1_000 {
        set.insert(i).unwrap();
    }
    let cap = set.capacity();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), cap);
    assert!(!set.contains(&1));
    assert!(set.insert(1).unwrap());
}

// Test: construction validates the configuration.
#[test]
fn construction_rejects_invalid_config() {
    match OpenHashSet::<i32>::with_max_load_factor(0.0) {
        Err(HashSetError::InvalidLoadFactor(lf)) => assert_eq!(lf, 0.0),
        other => panic!("unexpected result: {:?}", other.map(|s| s.capacity())),
    }
    match OpenHashSet::<i32>::with_config(HashSetConfig::default().growth_factor(1)) {
        Err(HashSetError::InvalidGrowthFactor(1)) => {}
        other => panic!("unexpected result: {:?}", other.map(|s| s.capacity())),
    }
    assert!(OpenHashSet::<i32>::with_max_load_factor(1.0).is_ok());
}

// Test: an initial capacity the allocator cannot satisfy is reported, not
// panicked on.
#[test]
fn construction_reports_allocation_failure() {
    match OpenHashSet::<u64>::with_capacity(usize::MAX) {
        Err(HashSetError::AllocationFailed { requested, .. }) => {
            assert_eq!(requested, usize::MAX)
        }
        other => panic!("unexpected result: {:?}", other.map(|s| s.capacity())),
    }
}

// Test: growth that the allocator cannot satisfy during insert.
// Verifies: the error surfaces from insert and the set is left as it was.
#[test]
fn insert_reports_allocation_failure() {
    let config = HashSetConfig::default()
        .initial_capacity(1)
        .max_load_factor(1.0)
        .growth_factor(usize::MAX);
    let mut set: OpenHashSet<u64> = OpenHashSet::with_config(config).unwrap();
    assert!(set.insert(1).unwrap());

    match set.insert(2) {
        Err(HashSetError::AllocationFailed { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(set.len(), 1);
    assert_eq!(set.capacity(), 1);
    assert!(set.contains(&1));
    assert!(!set.contains(&2));
}

// Test: capacity is monotonically non-decreasing under mixed workloads.
#[test]
fn capacity_never_shrinks() {
    let mut set = OpenHashSet::with_capacity(2).unwrap();
    let mut last = set.capacity();
    for round in 0..20u32 {
        for i in 0..(round * 10) {
            set.insert(i).unwrap();
            assert!(set.capacity() >= last);
            last = set.capacity();
        }
        for i in 0..(round * 10) {
            set.remove(&i);
            assert!(set.capacity() >= last);
        }
    }
    assert!(set.is_empty());
}

// Texture-name deduplication: a string-keyed set with a caller-supplied
// hashing capability decides whether an expensive resource must be
// created for a name.
#[derive(Default, Clone)]
struct StringHash;
impl BuildHasher for StringHash {
    type Hasher = DefaultHasher;
    fn build_hasher(&self) -> DefaultHasher {
        DefaultHasher::new()
    }
}

struct TextureRegistry {
    keys: OpenHashSet<String, StringHash>,
    created: Vec<String>,
}

impl TextureRegistry {
    fn new() -> Self {
        Self {
            keys: OpenHashSet::with_hasher(StringHash),
            created: Vec::new(),
        }
    }

    fn load(&mut self, name: &str) -> bool {
        if self.keys.contains(name) {
            return false;
        }
        self.keys.insert(name.to_string()).unwrap();
        self.created.push(name.to_string());
        true
    }
}

#[test]
fn texture_names_are_created_once() {
    let mut reg = TextureRegistry::new();
    let requests = [
        "player_idle.png",
        "player_run.png",
        "fireball.png",
        "player_idle.png",
        "fireball.png",
        "tile_grass.png",
    ];
    let loaded: Vec<bool> = requests.iter().map(|n| reg.load(n)).collect();
    assert_eq!(loaded, vec![true, true, true, false, false, true]);
    assert_eq!(reg.keys.len(), 4);
    assert_eq!(reg.created.len(), 4);
}

// Test: custom key type with its own Hash/Eq.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PlayerState {
    Idle,
    Walk,
    Jump,
    Attack,
}

#[test]
fn enum_keys() {
    let mut seen: OpenHashSet<PlayerState, BuildHasherDefault<DefaultHasher>> =
        OpenHashSet::with_hasher(Default::default());
    for s in [
        PlayerState::Idle,
        PlayerState::Walk,
        PlayerState::Idle,
        PlayerState::Jump,
        PlayerState::Walk,
    ] {
        seen.insert(s).unwrap();
    }
    assert_eq!(seen.len(), 3);
    assert!(!seen.contains(&PlayerState::Attack));
    assert_eq!(seen.get(&PlayerState::Jump), Some(&PlayerState::Jump));
}

// Test: external synchronization. The set is Send, so a Mutex makes it
// shareable across threads.
#[test]
fn shared_behind_mutex() {
    let set = Arc::new(Mutex::new(OpenHashSet::new()));
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let set = Arc::clone(&set);
            std::thread::spawn(move || {
                for i in 0..1_000u64 {
                    set.lock().unwrap().insert(i * 4 + t).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let set = set.lock().unwrap();
    assert_eq!(set.len(), 4_000);
    assert!((0..4_000u64).all(|i| set.contains(&i)));
}

// Test: Debug renders as a set.
#[test]
fn debug_format() {
    let mut set = OpenHashSet::new();
    set.insert(7).unwrap();
    assert_eq!(format!("{:?}", set), "{7}");
}
