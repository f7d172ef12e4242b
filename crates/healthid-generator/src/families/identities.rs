//! Anonymized health identities, the pool every campaign targets.

use crate::generators::timestamp::months_before;
use crate::generators::{
    clamped_normal, generate_id, random_date, random_int, weighted_index, weighted_item,
    weighted_sample_without_replacement,
};
use crate::prng::Mulberry32;
use chrono::{DateTime, Utc};
use healthid_core::{
    AgeRange, DataSource, Demographics, Gender, HealthIdentity, IdentityConfig, Region,
    ReputationTier,
};
use tracing::debug;

const HEALTH_SCORE_MEAN: f64 = 65.0;
const HEALTH_SCORE_STDDEV: f64 = 15.0;
pub const HEALTH_SCORE_MIN: u32 = 20;
pub const HEALTH_SCORE_MAX: u32 = 98;

pub const MAX_CONNECTED_SOURCES: i64 = 4;
pub const MAX_ENROLLED_CAMPAIGNS: i64 = 5;

/// Generate `config.count` identities from the `config.seed` stream.
///
/// `config` must have passed [`healthid_core::DatasetConfig::validate`].
pub fn generate_identities(config: &IdentityConfig, now: DateTime<Utc>) -> Vec<HealthIdentity> {
    let mut rng = Mulberry32::new(config.seed);
    let window_start = months_before(now, config.history_months);

    let identities: Vec<HealthIdentity> = (0..config.count)
        .map(|_| {
            let tier_index = weighted_index(&mut rng, &config.reputation_weights)
                .min(ReputationTier::ALL.len() - 1);
            let reputation_tier = ReputationTier::ALL[tier_index];

            let health_score = clamped_normal(
                &mut rng,
                HEALTH_SCORE_MEAN,
                HEALTH_SCORE_STDDEV,
                HEALTH_SCORE_MIN,
                HEALTH_SCORE_MAX,
            );

            let source_count = random_int(&mut rng, 1, MAX_CONNECTED_SOURCES) as usize;
            let connected_sources = weighted_sample_without_replacement(
                &mut rng,
                DataSource::ALL,
                &config.data_source_weights,
                source_count,
            );

            let gender = weighted_item(&mut rng, Gender::ALL, &config.gender_weights);
            let age_range = weighted_item(&mut rng, AgeRange::ALL, &config.age_range_weights);
            let region = weighted_item(&mut rng, Region::ALL, &config.region_weights);

            let [min, max] = config
                .verification_ranges
                .get(tier_index)
                .copied()
                .unwrap_or([0, 0]);
            let verification_count = random_int(&mut rng, i64::from(min), i64::from(max)) as u32;

            let enrolled_campaigns = random_int(&mut rng, 0, MAX_ENROLLED_CAMPAIGNS) as u32;

            let created_at = random_date(&mut rng, window_start, now);
            let last_verified =
                (verification_count > 0).then(|| random_date(&mut rng, created_at, now));

            HealthIdentity {
                id: generate_id(&mut rng, "hid"),
                anonymized_id: generate_id(&mut rng, "anon"),
                health_score,
                reputation_tier,
                connected_sources,
                demographics: Demographics {
                    age_range,
                    gender,
                    region,
                },
                verification_count,
                last_verified,
                enrolled_campaigns,
                created_at,
            }
        })
        .collect();

    debug!(
        count = identities.len(),
        seed = config.seed,
        "Generated health identities"
    );
    identities
}
