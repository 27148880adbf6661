use super::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn validate_fixture(config: &CorpusConfig, fx: &LookupFixture) {
    let keys = &fx.corpus.keys;
    assert_eq!(
        fx.corpus.values.len(),
        keys.len(),
        "values must stay parallel to keys"
    );
    assert!(
        fx.corpus.len() <= config.target_size,
        "filtering must not grow the corpus past the pool size"
    );
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "corpus keys must be sorted and unique");
    }
    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert!(!is_prefix(a, b), "{a:?} shadows {b:?}");
            assert!(!is_prefix(b, a), "{b:?} shadows {a:?}");
        }
    }
    for &value in &fx.corpus.values {
        assert_ne!(value, NOT_FOUND, "sentinel leaked into corpus values");
    }

    for seq in [&fx.prefix_collisions, &fx.clean_misses] {
        for pair in seq.windows(2) {
            assert!(pair[0] < pair[1], "probes must be sorted and unique");
        }
    }
    for probe in &fx.prefix_collisions {
        assert!(!fx.corpus.contains_key(probe), "probe is a corpus member");
        assert!(
            keys.iter().any(|k| is_prefix(k, probe)),
            "no corpus key shadows collision probe {probe:?}"
        );
    }
    for probe in &fx.clean_misses {
        assert!(!fx.corpus.contains_key(probe), "probe is a corpus member");
        assert!(
            keys.iter().all(|k| !is_prefix(k, probe)),
            "clean miss {probe:?} is shadowed"
        );
    }

    for key in keys
        .iter()
        .chain(&fx.prefix_collisions)
        .chain(&fx.clean_misses)
    {
        assert!((config.min_key_len..=config.max_key_len).contains(&key.len()));
        assert!(!key.contains(&0), "zero byte in key {key:?}");
    }
}

fn dense_key_strategy() -> impl Strategy<Value = Key> + Clone {
    // A tiny alphabet with short lengths makes prefix chains and duplicates
    // common, including chains between keys that do not sort adjacently in
    // the raw pool. That is the case the adjacent-pair filter has to get
    // right.
    prop::collection::vec(1u8..=3, 1..=4)
}

fn dense_pool_strategy() -> impl Strategy<Value = Vec<Key>> {
    prop::collection::vec(dense_key_strategy(), 0..=64)
}

fn config_strategy() -> impl Strategy<Value = CorpusConfig> {
    (1usize..=4, 0usize..=8, 0usize..=80).prop_map(|(min, span, size)| CorpusConfig {
        min_key_len: min,
        max_key_len: min + span,
        target_size: size,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_subset_is_globally_prefix_free(pool in dense_pool_strategy()) {
        let out = prefix_free_subset(pool.clone());
        for pair in out.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                prop_assert!(!is_prefix(a, b), "{:?} is a prefix of {:?}", a, b);
                prop_assert!(!is_prefix(b, a), "{:?} is a prefix of {:?}", b, a);
            }
        }
        for key in &out {
            prop_assert!(pool.contains(key), "{:?} not drawn from the pool", key);
        }
    }

    #[test]
    fn prop_partition_agrees_with_direct_scan(
        pool in dense_pool_strategy(),
        probes in dense_pool_strategy(),
    ) {
        let corpus = prefix_free_subset(pool);
        let (collisions, misses) = partition_probes(&corpus, probes.clone());
        prop_assert_eq!(collisions.len() + misses.len(), probes.len());

        for probe in &collisions {
            prop_assert!(corpus.iter().any(|k| is_prefix(k, probe)));
            prop_assert_eq!(classify(&corpus, probe), ProbeKind::CollidesOnPrefix);
        }
        for probe in &misses {
            prop_assert!(corpus.iter().all(|k| !is_prefix(k, probe)));
            prop_assert_eq!(classify(&corpus, probe), ProbeKind::CleanMiss);
        }

        let mut recombined: Vec<Key> = collisions.iter().chain(&misses).cloned().collect();
        recombined.sort();
        let mut expected = probes;
        expected.sort();
        prop_assert_eq!(recombined, expected);
    }

    #[test]
    fn prop_assemble_upholds_fixture_invariants(
        seed in any::<u64>(),
        config in config_strategy(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let fx = assemble(&mut rng, &config).unwrap();
        validate_fixture(&config, &fx);
    }

    #[test]
    fn prop_assemble_is_deterministic(seed in any::<u64>()) {
        let config = CorpusConfig {
            min_key_len: 1,
            max_key_len: 6,
            target_size: 40,
        };
        let mut a = StdRng::seed_from_u64(seed);
        let mut b = StdRng::seed_from_u64(seed);
        prop_assert_eq!(
            assemble(&mut a, &config).unwrap(),
            assemble(&mut b, &config).unwrap()
        );
    }

    #[test]
    fn prop_truncating_a_member_misses_cleanly(seed in any::<u64>()) {
        let config = CorpusConfig {
            min_key_len: 2,
            max_key_len: 6,
            target_size: 40,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let fx = assemble(&mut rng, &config).unwrap();
        // A strict prefix of a member cannot itself be shadowed: any key
        // shadowing it would shadow the member too.
        for key in &fx.corpus.keys {
            for cut in 1..key.len() {
                prop_assert_eq!(
                    classify(&fx.corpus.keys, &key[..cut]),
                    ProbeKind::CleanMiss
                );
            }
        }
    }

    #[test]
    fn prop_extending_a_member_collides(
        seed in any::<u64>(),
        suffix in dense_key_strategy(),
    ) {
        let config = CorpusConfig {
            min_key_len: 1,
            max_key_len: 4,
            target_size: 40,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let fx = assemble(&mut rng, &config).unwrap();
        for key in &fx.corpus.keys {
            let mut probe = key.clone();
            probe.extend_from_slice(&suffix);
            prop_assert_eq!(
                classify(&fx.corpus.keys, &probe),
                ProbeKind::CollidesOnPrefix
            );
            prop_assert!(!fx.corpus.contains_key(&probe));
        }
    }
}
