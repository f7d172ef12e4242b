//! Read-only queries over generated collections.
//!
//! These are the aggregates the explorer and dashboard screens compute from
//! the dataset: cohort filtering, tier / score / source distributions, and
//! per-campaign and compliance roll-ups.

use crate::entities::{
    Campaign, CampaignType, ComplianceRecord, HealthIdentity, VerificationReceipt,
};
use crate::types::{
    AgeRange, CampaignStatus, ComplianceEventType, DataSource, Gender, ReputationTier,
};
use serde::{Deserialize, Serialize};

/// Display order for tier distributions, rarest first.
pub const TIER_DISPLAY_ORDER: [ReputationTier; 5] = [
    ReputationTier::Diamond,
    ReputationTier::Platinum,
    ReputationTier::Gold,
    ReputationTier::Silver,
    ReputationTier::Bronze,
];

/// Cohort filter over identities. Empty lists match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityFilter {
    /// Inclusive health-score bounds.
    pub health_score_range: (u32, u32),
    pub reputation_tiers: Vec<ReputationTier>,
    /// Matches identities with at least one of these sources connected.
    pub data_sources: Vec<DataSource>,
    pub age_ranges: Vec<AgeRange>,
    pub genders: Vec<Gender>,
}

impl Default for IdentityFilter {
    fn default() -> Self {
        Self {
            health_score_range: (0, 100),
            reputation_tiers: Vec::new(),
            data_sources: Vec::new(),
            age_ranges: Vec::new(),
            genders: Vec::new(),
        }
    }
}

impl IdentityFilter {
    /// Score 75+ in the three highest tiers.
    pub fn high_value() -> Self {
        Self {
            health_score_range: (75, 100),
            reputation_tiers: vec![
                ReputationTier::Diamond,
                ReputationTier::Platinum,
                ReputationTier::Gold,
            ],
            ..Self::default()
        }
    }

    /// Any consumer wearable connected.
    pub fn wearable_verified() -> Self {
        Self {
            data_sources: vec![
                DataSource::AppleHealth,
                DataSource::Fitbit,
                DataSource::Garmin,
                DataSource::Oura,
                DataSource::Whoop,
            ],
            ..Self::default()
        }
    }

    pub fn lab_confirmed() -> Self {
        Self {
            data_sources: vec![DataSource::LabResults],
            ..Self::default()
        }
    }

    pub fn matches(&self, identity: &HealthIdentity) -> bool {
        let (min, max) = self.health_score_range;
        if identity.health_score < min || identity.health_score > max {
            return false;
        }
        if !self.reputation_tiers.is_empty()
            && !self.reputation_tiers.contains(&identity.reputation_tier)
        {
            return false;
        }
        if !self.data_sources.is_empty()
            && !self
                .data_sources
                .iter()
                .any(|s| identity.connected_sources.contains(s))
        {
            return false;
        }
        if !self.age_ranges.is_empty()
            && !self.age_ranges.contains(&identity.demographics.age_range)
        {
            return false;
        }
        if !self.genders.is_empty() && !self.genders.contains(&identity.demographics.gender) {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, identities: &'a [HealthIdentity]) -> Vec<&'a HealthIdentity> {
        identities.iter().filter(|i| self.matches(i)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierShare {
    pub tier: ReputationTier,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub min: u32,
    pub max: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: DataSource,
    pub count: usize,
    pub pct: f64,
}

/// Headline numbers for a filtered cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStats {
    pub size: usize,
    pub avg_health_score: f64,
    pub verified_identities: usize,
    pub verified_share: f64,
    pub connected_sources: usize,
}

fn share(count: usize, total: usize) -> f64 {
    count as f64 / total.max(1) as f64
}

pub fn cohort_stats(cohort: &[&HealthIdentity]) -> CohortStats {
    let size = cohort.len();
    let score_sum: u64 = cohort.iter().map(|i| i.health_score as u64).sum();
    let verified_identities = cohort.iter().filter(|i| i.verification_count > 0).count();
    CohortStats {
        size,
        avg_health_score: score_sum as f64 / size.max(1) as f64,
        verified_identities,
        verified_share: share(verified_identities, size),
        connected_sources: cohort.iter().map(|i| i.connected_sources.len()).sum(),
    }
}

/// Count per tier, in [`TIER_DISPLAY_ORDER`].
pub fn tier_distribution(cohort: &[&HealthIdentity]) -> Vec<TierShare> {
    TIER_DISPLAY_ORDER
        .iter()
        .map(|&tier| {
            let count = cohort.iter().filter(|i| i.reputation_tier == tier).count();
            TierShare {
                tier,
                count,
                pct: share(count, cohort.len()),
            }
        })
        .collect()
}

/// Ten buckets of width 10 (`0-9` .. `90-99`); scores of 100 land in the last.
pub fn score_histogram(cohort: &[&HealthIdentity]) -> Vec<ScoreBucket> {
    let mut buckets: Vec<ScoreBucket> = (0..10)
        .map(|i| ScoreBucket {
            min: i * 10,
            max: i * 10 + 9,
            count: 0,
        })
        .collect();
    for identity in cohort {
        let idx = ((identity.health_score / 10) as usize).min(9);
        buckets[idx].count += 1;
    }
    buckets
}

/// Connected-source counts, most common first. Ties keep source order.
pub fn source_distribution(cohort: &[&HealthIdentity]) -> Vec<SourceShare> {
    let mut shares: Vec<SourceShare> = DataSource::FALLBACK_ORDER
        .iter()
        .map(|&source| {
            let count = cohort
                .iter()
                .filter(|i| i.connected_sources.contains(&source))
                .count();
            SourceShare {
                source,
                count,
                pct: share(count, cohort.len()),
            }
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Receipts for one campaign, newest first.
pub fn campaign_verifications<'a>(
    verifications: &'a [VerificationReceipt],
    campaign_id: &str,
) -> Vec<&'a VerificationReceipt> {
    let mut receipts: Vec<_> = verifications
        .iter()
        .filter(|v| v.campaign_id == campaign_id)
        .collect();
    receipts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    receipts
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOverview {
    pub total: usize,
    pub active: usize,
    pub snapshot: usize,
    pub stream: usize,
    pub total_budget: u64,
    pub total_verified: u64,
}

pub fn campaign_overview(campaigns: &[Campaign]) -> CampaignOverview {
    CampaignOverview {
        total: campaigns.len(),
        active: campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .count(),
        snapshot: campaigns
            .iter()
            .filter(|c| c.campaign_type() == CampaignType::Snapshot)
            .count(),
        stream: campaigns
            .iter()
            .filter(|c| c.campaign_type() == CampaignType::Stream)
            .count(),
        total_budget: campaigns.iter().map(|c| c.rewards.budget_ceiling).sum(),
        total_verified: campaigns.iter().map(|c| c.funnel.verified as u64).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStats {
    pub total_records: usize,
    /// Generated plus verified proof events.
    pub total_proofs: usize,
    pub total_failed: usize,
    pub pii_events: usize,
}

pub fn compliance_stats(records: &[ComplianceRecord]) -> ComplianceStats {
    ComplianceStats {
        total_records: records.len(),
        total_proofs: records
            .iter()
            .filter(|r| {
                matches!(
                    r.event_type,
                    ComplianceEventType::ProofGenerated | ComplianceEventType::ProofVerified
                )
            })
            .count(),
        total_failed: records
            .iter()
            .filter(|r| r.event_type == ComplianceEventType::ProofFailed)
            .count(),
        pii_events: records.iter().filter(|r| r.pii_accessed).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Demographics;
    use crate::types::Region;
    use chrono::{TimeZone, Utc};

    fn identity(score: u32, tier: ReputationTier, sources: &[DataSource]) -> HealthIdentity {
        HealthIdentity {
            id: format!("hid_{score:08x}"),
            anonymized_id: "anon_00000000".to_string(),
            health_score: score,
            reputation_tier: tier,
            connected_sources: sources.to_vec(),
            demographics: Demographics {
                age_range: AgeRange::From25To34,
                gender: Gender::Female,
                region: Region::Europe,
            },
            verification_count: if tier == ReputationTier::Bronze { 0 } else { 5 },
            last_verified: None,
            enrolled_campaigns: 1,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<HealthIdentity> {
        vec![
            identity(82, ReputationTier::Gold, &[DataSource::Oura]),
            identity(90, ReputationTier::Bronze, &[DataSource::AppleHealth]),
            identity(45, ReputationTier::Diamond, &[DataSource::LabResults]),
            identity(100, ReputationTier::Platinum, &[DataSource::GoogleFit]),
        ]
    }

    #[test]
    fn test_default_filter_matches_all() {
        let ids = sample();
        assert_eq!(IdentityFilter::default().apply(&ids).len(), ids.len());
    }

    #[test]
    fn test_high_value_preset() {
        let ids = sample();
        let matched = IdentityFilter::high_value().apply(&ids);
        let scores: Vec<_> = matched.iter().map(|i| i.health_score).collect();
        assert_eq!(scores, vec![82, 100]);
    }

    #[test]
    fn test_source_filter_is_any_of() {
        let ids = sample();
        let wearable = IdentityFilter::wearable_verified().apply(&ids);
        assert_eq!(wearable.len(), 2);
        let lab = IdentityFilter::lab_confirmed().apply(&ids);
        assert_eq!(lab.len(), 1);
        assert_eq!(lab[0].reputation_tier, ReputationTier::Diamond);
    }

    #[test]
    fn test_histogram_puts_100_in_last_bucket() {
        let ids = sample();
        let cohort: Vec<_> = ids.iter().collect();
        let buckets = score_histogram(&cohort);
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[9].count, 2);
        assert_eq!(buckets[8].count, 1);
        assert_eq!(buckets[4].count, 1);
    }

    #[test]
    fn test_tier_distribution_order_and_shares() {
        let ids = sample();
        let cohort: Vec<_> = ids.iter().collect();
        let dist = tier_distribution(&cohort);
        assert_eq!(dist[0].tier, ReputationTier::Diamond);
        assert_eq!(dist[4].tier, ReputationTier::Bronze);
        let total: f64 = dist.iter().map(|t| t.pct).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_cohort_does_not_divide_by_zero() {
        let stats = cohort_stats(&[]);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.avg_health_score, 0.0);
        assert_eq!(stats.verified_share, 0.0);
        assert!(tier_distribution(&[]).iter().all(|t| t.pct == 0.0));
    }

    #[test]
    fn test_source_distribution_sorted_desc() {
        let mut ids = sample();
        ids.push(identity(60, ReputationTier::Silver, &[DataSource::Oura]));
        let cohort: Vec<_> = ids.iter().collect();
        let dist = source_distribution(&cohort);
        assert_eq!(dist[0].source, DataSource::Oura);
        assert_eq!(dist[0].count, 2);
        assert!(dist.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
