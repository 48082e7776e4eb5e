#![cfg(test)]

// Property tests for TokenCounter and Table kept inside the crate so they can
// inspect table internals without widening the public API.

use crate::config::CounterConfig;
use crate::counter::{Recorded, TokenCounter};
use crate::digest::digest;
use crate::probe::ProbeSequence;
use crate::table::{Table, Upsert};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn counts(c: &TokenCounter) -> BTreeMap<Vec<u8>, u64> {
    c.entries().map(|(k, n)| (k.to_vec(), n)).collect()
}

fn snapshot(t: &Table) -> BTreeMap<Vec<u8>, u64> {
    t.entries().map(|(k, n)| (k.to_vec(), n)).collect()
}

fn roomy(initial_size_bits: u32, probe_limit: u32) -> CounterConfig {
    CounterConfig {
        initial_size_bits,
        size_bits_limit: 20,
        probe_limit,
    }
}

// Pool-indexed token streams: indices shrink to earlier keys, the pool shrinks,
// and the stream shrinks in length.
fn arb_stream() -> impl Strategy<Value = (Vec<String>, Vec<usize>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=40).prop_flat_map(|pool| {
        let n = pool.len();
        proptest::collection::vec(0..n, 0..200).prop_map(move |idx| (pool.clone(), idx))
    })
}

// Property: multiset equivalence against std::collections::HashMap.
// Invariants exercised across random token streams:
// - Every reported count equals the number of occurrences recorded.
// - `record` reports Inserted exactly for the first occurrence of a key.
// - Capacity is a power of two and size bits never decrease.
// - Growth keeps the key set and the count total unchanged.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_counts_match_model((pool, stream) in arb_stream(), initial in 1u32..6, probes in 1u32..4) {
        let mut sut = TokenCounter::with_config(roomy(initial, probes)).unwrap();
        let mut model: HashMap<String, u64> = HashMap::new();
        let mut last_bits = sut.size_bits();

        for i in stream {
            let key = &pool[i];
            let before_growths = sut.growths();
            let before_total = sut.total();
            let first = !model.contains_key(key);

            let rec = sut.record(key);
            prop_assert!(rec.is_ok(), "unexpected growth failure: {:?}", rec);
            prop_assert_eq!(rec.unwrap() == Recorded::Inserted, first);
            *model.entry(key.clone()).or_default() += 1;

            prop_assert_eq!(sut.total(), before_total + 1);
            prop_assert!(sut.growths() >= before_growths);
            prop_assert!(sut.size_bits() >= last_bits, "size bits decreased");
            prop_assert!(sut.capacity().is_power_of_two());
            prop_assert_eq!(sut.capacity(), 1usize << sut.size_bits());
            last_bits = sut.size_bits();

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.get(key), model.get(key).copied());
        }

        let expected: BTreeMap<Vec<u8>, u64> =
            model.into_iter().map(|(k, n)| (k.into_bytes(), n)).collect();
        prop_assert_eq!(counts(&sut), expected);
    }
}

// Property: the final tally does not depend on the order tokens arrive in.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_order_independent((pool, stream) in arb_stream(), seed in any::<u64>()) {
        let mut shuffled = stream.clone();
        // Deterministic shuffle driven by the seed.
        let mut s = seed | 1;
        for i in (1..shuffled.len()).rev() {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (s >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        let mut a = TokenCounter::with_config(roomy(1, 2)).unwrap();
        let mut b = TokenCounter::with_config(roomy(1, 2)).unwrap();
        for &i in &stream {
            a.record(&pool[i]).unwrap();
        }
        for &i in &shuffled {
            b.record(&pool[i]).unwrap();
        }
        prop_assert_eq!(counts(&a), counts(&b));
    }
}

// Property: a rehash either moves every entry intact or leaves the source
// exactly as it was.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_rehash_conserves_entries(keys in proptest::collection::vec("[a-z]{1,6}", 0..60), target in 1u32..12) {
        let mut t = Table::new(8, 10);
        for k in &keys {
            let _ = t.upsert(k.as_bytes());
        }
        let before = snapshot(&t);
        let total: u64 = before.values().sum();

        match t.rehash(target) {
            Some(next) => {
                let after = snapshot(&next);
                prop_assert_eq!(&after, &before);
                prop_assert_eq!(after.values().sum::<u64>(), total);
                prop_assert_eq!(next.len(), before.len());
                prop_assert!(t.is_empty());
            }
            None => {
                prop_assert_eq!(snapshot(&t), before);
            }
        }
    }
}

// Property: arbitrary bytes, including invalid UTF-8, count like any other key.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_raw_byte_keys(keys in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..6), 0..120)) {
        let mut sut = TokenCounter::with_config(roomy(2, 3)).unwrap();
        let mut model: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
        for k in &keys {
            prop_assert!(sut.record(k).is_ok());
            *model.entry(k.clone()).or_default() += 1;
        }
        prop_assert_eq!(counts(&sut), model);
    }
}

// Property: digest and probe sequences are pure functions of key and size,
// and exhaustion is reported exactly when every candidate holds another key.
proptest! {
    #[test]
    fn prop_probe_bound(keys in proptest::collection::vec("[a-z]{0,4}", 1..40), probe in "[a-z]{0,4}", bits in 1u32..6, limit in 0u32..4) {
        let mut t = Table::new(bits, limit);
        for k in &keys {
            let _ = t.upsert(k.as_bytes());
        }
        let probe = probe.as_bytes();
        let d = digest(probe, bits);
        prop_assert_eq!(d, digest(probe, bits));
        let cands: Vec<usize> = ProbeSequence::new(d, bits, limit).collect();
        prop_assert_eq!(&cands, &ProbeSequence::new(d, bits, limit).collect::<Vec<_>>());
        prop_assert_eq!(cands.len(), limit as usize + 1);

        let blocked = cands.iter().all(|&idx| {
            t.key_at(idx).is_some_and(|k| k != probe)
        });
        let res = t.upsert(probe);
        prop_assert_eq!(res == Upsert::ProbeExhausted, blocked);
    }
}
