//! Property tests for the sampling primitives and whole-dataset generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use healthid_core::DatasetConfig;
use healthid_generator::generators::hex::{is_lower_hex, HASH_LEN};
use healthid_generator::generators::{
    generate_hash, generate_id, random_date, random_int, random_items, weighted_index,
};
use healthid_generator::{generate_dataset, Mulberry32};
use proptest::prelude::*;
use rand::RngCore;

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn prop_same_seed_same_stream(seed in any::<i32>()) {
        let mut a = Mulberry32::new(seed);
        let mut b = Mulberry32::new(seed);
        for _ in 0..64 {
            prop_assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn prop_random_int_inclusive(seed in any::<i32>(), min in -1000i64..1000, span in 0i64..1000) {
        let mut rng = Mulberry32::new(seed);
        let max = min + span;
        for _ in 0..32 {
            let v = random_int(&mut rng, min, max);
            prop_assert!(v >= min && v <= max);
        }
    }

    #[test]
    fn prop_weighted_index_in_bounds(
        seed in any::<i32>(),
        weights in prop::collection::vec(0.0f64..10.0, 1..12),
    ) {
        let mut rng = Mulberry32::new(seed);
        for _ in 0..32 {
            prop_assert!(weighted_index(&mut rng, &weights) < weights.len());
        }
    }

    #[test]
    fn prop_weighted_index_skips_zero_weights(
        seed in any::<i32>(),
        hot in 1usize..6,
    ) {
        // Only one non-zero entry past index 0: every draw above zero lands on it.
        let mut weights = vec![0.0; 6];
        weights[hot] = 1.0;
        let mut rng = Mulberry32::new(seed);
        for _ in 0..32 {
            let idx = weighted_index(&mut rng, &weights);
            prop_assert!(idx == hot || idx == 0);
        }
    }

    #[test]
    fn prop_random_items_unique(seed in any::<i32>(), len in 0usize..20, count in 0usize..25) {
        let pool: Vec<usize> = (0..len).collect();
        let mut rng = Mulberry32::new(seed);
        let mut picked = random_items(&mut rng, &pool, count);
        prop_assert_eq!(picked.len(), count.min(len));
        picked.sort_unstable();
        picked.dedup();
        prop_assert_eq!(picked.len(), count.min(len));
    }

    #[test]
    fn prop_hash_and_id_formats(seed in any::<i32>(), prefix in "[a-z]{2,5}") {
        let mut rng = Mulberry32::new(seed);
        prop_assert!(is_lower_hex(&generate_hash(&mut rng), HASH_LEN));
        let id = generate_id(&mut rng, &prefix);
        let (head, tail) = id.split_once('_').unwrap();
        prop_assert_eq!(head, prefix.as_str());
        prop_assert!(is_lower_hex(tail, 8));
    }

    #[test]
    fn prop_random_date_within_range(seed in any::<i32>(), days in 0i64..3650) {
        let start = reference_now() - Duration::days(days);
        let end = reference_now();
        let mut rng = Mulberry32::new(seed);
        let dt = random_date(&mut rng, start, end);
        prop_assert!(dt >= start && dt <= end);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_dataset_deterministic_for_any_seeds(
        identity_seed in any::<i32>(),
        verification_seed in any::<i32>(),
        treasury_seed in any::<i32>(),
    ) {
        let mut config = DatasetConfig::default();
        config.identities.seed = identity_seed;
        config.identities.count = 200;
        config.verifications.seed = verification_seed;
        config.verifications.count = 100;
        config.treasury.seed = treasury_seed;

        let a = generate_dataset(&config, reference_now()).unwrap();
        let b = generate_dataset(&config, reference_now()).unwrap();
        prop_assert_eq!(a.identities(), b.identities());
        prop_assert_eq!(a.verifications(), b.verifications());
        prop_assert_eq!(a.treasury_transactions(), b.treasury_transactions());

        for t in a.treasury_transactions() {
            prop_assert!(t.balance >= 0.0);
        }
        for c in a.campaigns() {
            prop_assert!(c.funnel.is_monotonic());
        }
        for r in a.verifications() {
            prop_assert!(a.identity(&r.identity_id).is_some());
            prop_assert!(a.campaign(&r.campaign_id).is_some());
        }
    }
}
