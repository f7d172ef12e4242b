//! Verification receipts: one zero-knowledge proof attempt per record.

use crate::generator::GeneratorError;
use crate::generators::timestamp::months_before;
use crate::generators::{
    clamped_normal, generate_id, generate_prefixed_hash, random_date, random_int, random_item,
    random_items, weighted_item,
};
use crate::prng::Mulberry32;
use chrono::{DateTime, Duration, Utc};
use healthid_core::{
    AggregationType, Campaign, CampaignStatus, DataSource, HealthIdentity, ProofType,
    VerificationConfig, VerificationMetadata, VerificationReceipt, VerificationStatus,
};
use tracing::debug;

pub const PROOF_MS_MEAN: f64 = 300.0;
pub const PROOF_MS_STDDEV: f64 = 120.0;
pub const PROOF_MS_MIN: u32 = 50;
pub const PROOF_MS_MAX: u32 = 2000;

/// Extra settlement delay after proof generation, in milliseconds.
pub const SETTLE_MS_MIN: i64 = 500;
pub const SETTLE_MS_MAX: i64 = 5000;

pub const MAX_SOURCES_PER_PROOF: usize = 3;

pub const TIME_WINDOW_HOURS: [u32; 6] = [1, 6, 12, 24, 48, 168];

/// Generate receipts against non-draft `campaigns` and any of `identities`.
///
/// The result is sorted newest first. Fails with
/// [`GeneratorError::EmptyPool`] when `config.count > 0` and either pool is
/// empty.
pub fn generate_verifications(
    config: &VerificationConfig,
    campaigns: &[Campaign],
    identities: &[HealthIdentity],
    now: DateTime<Utc>,
) -> Result<Vec<VerificationReceipt>, GeneratorError> {
    let eligible: Vec<&Campaign> = campaigns
        .iter()
        .filter(|c| c.status != CampaignStatus::Draft)
        .collect();
    if config.count > 0 {
        if eligible.is_empty() {
            return Err(GeneratorError::EmptyPool {
                family: "verifications",
                pool: "non-draft campaigns",
            });
        }
        if identities.is_empty() {
            return Err(GeneratorError::EmptyPool {
                family: "verifications",
                pool: "identities",
            });
        }
    }

    let mut rng = Mulberry32::new(config.seed);
    let window_start = months_before(now, config.history_months);
    let mut receipts = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let (Some(campaign), Some(identity)) = (
            random_item(&mut rng, &eligible),
            random_item(&mut rng, identities),
        ) else {
            break;
        };

        let proof_type = weighted_item(&mut rng, ProofType::ALL, &config.proof_type_weights);
        let status = weighted_item(&mut rng, VerificationStatus::ALL, &config.status_weights);

        let proof_generation_ms = clamped_normal(
            &mut rng,
            PROOF_MS_MEAN,
            PROOF_MS_STDDEV,
            PROOF_MS_MIN,
            PROOF_MS_MAX,
        );

        let timestamp = random_date(&mut rng, window_start, now);
        let verified_at = (status == VerificationStatus::Verified).then(|| {
            let settle = random_int(&mut rng, SETTLE_MS_MIN, SETTLE_MS_MAX);
            timestamp + Duration::milliseconds(i64::from(proof_generation_ms) + settle)
        });

        let pool: &[DataSource] = if identity.connected_sources.is_empty() {
            DataSource::FALLBACK_ORDER
        } else {
            &identity.connected_sources
        };
        let source_count = random_int(&mut rng, 1, MAX_SOURCES_PER_PROOF.min(pool.len()) as i64);
        let data_sources = random_items(&mut rng, pool, source_count as usize);

        let id = generate_id(&mut rng, "vrf");
        let proof_hash = generate_prefixed_hash(&mut rng);
        let metadata = VerificationMetadata {
            aggregation_type: random_item(&mut rng, AggregationType::ALL)
                .copied()
                .unwrap_or(AggregationType::Mean),
            time_window_hours: random_item(&mut rng, &TIME_WINDOW_HOURS)
                .copied()
                .unwrap_or(24),
            data_point_count: random_int(&mut rng, 10, 5000) as u32,
        };

        receipts.push(VerificationReceipt {
            id,
            campaign_id: campaign.id.clone(),
            identity_id: identity.id.clone(),
            proof_type,
            proof_hash,
            status,
            metric: campaign.challenge.metric,
            data_sources,
            timestamp,
            verified_at,
            proof_generation_ms,
            metadata,
        });
    }

    receipts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        count = receipts.len(),
        seed = config.seed,
        "Generated verification receipts"
    );
    Ok(receipts)
}
