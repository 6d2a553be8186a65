//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the capacity and accounting invariants over
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys from a small alphabet so sequences collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f][0-9]{0,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// One cache operation.
#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: String, value: u32 },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Insert { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence and any capacity, the resident entry count
    // never exceeds the capacity.
    #[test]
    fn prop_capacity_never_exceeded(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => store.insert(key, value),
                CacheOp::Get { key } => { store.get(&key); }
            }
            prop_assert!(store.len() <= capacity, "size exceeded capacity");
        }
    }

    // For any operation sequence, hit/miss counters match a shadow count
    // derived from the same sequence.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(100, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => store.insert(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hit count mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "miss count mismatch");
        prop_assert_eq!(stats.size, store.len(), "size mismatch");
    }

    // Inserting C+1 distinct keys leaves exactly C resident, and the evicted
    // key is the least recently touched one (the first inserted).
    #[test]
    fn prop_lru_victim_is_oldest(capacity in 1usize..10) {
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for i in 0..=capacity {
            store.insert(format!("key{}", i), i as u32);
        }

        prop_assert_eq!(store.len(), capacity);
        prop_assert!(store.get("key0").is_none(), "oldest key should be evicted");
        for i in 1..=capacity {
            let key = format!("key{}", i);
            prop_assert!(store.get(&key).is_some());
        }
    }

    // Last-writer-wins: after any insert sequence, each surviving key reads
    // back the value most recently written to it.
    #[test]
    fn prop_overwrite_reads_latest(
        writes in prop::collection::vec((key_strategy(), value_strategy()), 1..40),
    ) {
        let mut store = CacheStore::new(100, TEST_TTL);
        let mut shadow = std::collections::HashMap::new();

        for (key, value) in writes {
            store.insert(key.clone(), value);
            shadow.insert(key, value);
        }

        let keys: HashSet<String> = shadow.keys().cloned().collect();
        for key in keys {
            prop_assert_eq!(store.get(&key), shadow.get(&key).copied());
        }
    }
}
