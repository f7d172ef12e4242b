//! Record types for every generated collection.
//!
//! All records are plain immutable values. Field names serialize in camelCase
//! and timestamps in ISO 8601 with milliseconds.

use crate::types::{
    AgeRange, AggregationType, CampaignStatus, ChallengeOperator, ComplianceEventType, DataSource,
    Gender, HealthMetric, PartnerIndustry, PartnerTier, ProofType, Region, ReputationTier,
    StreamFrequency, TransactionType, VerificationStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Partners
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub verification_alerts: bool,
    pub budget_alerts: bool,
    pub weekly_digest: bool,
    pub compliance_reports: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRetention {
    pub proof_retention_days: u32,
    pub audit_log_retention_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSettings {
    pub notifications: NotificationSettings,
    pub data_retention: DataRetention,
    pub allowed_regions: Vec<Region>,
    pub max_concurrent_campaigns: u32,
}

/// A partner organisation that funds campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub label: String,
    pub tier: PartnerTier,
    pub industry: PartnerIndustry,
    pub api_key_prefix: String,
    pub settings: PartnerSettings,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Identities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age_range: AgeRange,
    pub gender: Gender,
    pub region: Region,
}

/// An anonymized participant in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIdentity {
    pub id: String,
    pub anonymized_id: String,
    pub health_score: u32,
    pub reputation_tier: ReputationTier,
    pub connected_sources: Vec<DataSource>,
    pub demographics: Demographics,
    pub verification_count: u32,
    /// Present only when `verification_count > 0`.
    #[serde(with = "crate::timestamp::option")]
    pub last_verified: Option<DateTime<Utc>>,
    pub enrolled_campaigns: u32,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Campaigns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeCriteria {
    pub metric: HealthMetric,
    pub operator: ChallengeOperator,
    pub target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_max: Option<f64>,
    pub unit: String,
}

/// Cohort filter a campaign targets. Absent lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortTargeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation_tiers: Option<Vec<ReputationTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<Vec<DataSource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_ranges: Option<Vec<AgeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<Gender>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRewards {
    pub points_per_verification: u32,
    pub budget_ceiling: u64,
    pub budget_spent: u64,
    pub max_participants: u32,
}

/// Conversion funnel counts; each stage is no larger than the one before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFunnelData {
    pub eligible: u32,
    pub invited: u32,
    pub enrolled: u32,
    pub verified: u32,
    pub rewarded: u32,
}

impl CampaignFunnelData {
    /// Stages in pipeline order.
    pub fn stages(&self) -> [u32; 5] {
        [
            self.eligible,
            self.invited,
            self.enrolled,
            self.verified,
            self.rewarded,
        ]
    }

    pub fn is_monotonic(&self) -> bool {
        self.stages().windows(2).all(|w| w[0] >= w[1])
    }

    /// Share of enrolled participants that verified.
    ///
    /// The denominator is floored at 1 so empty funnels report 0.
    pub fn verification_rate(&self) -> f64 {
        self.verified as f64 / self.enrolled.max(1) as f64
    }
}

/// Type-specific campaign data. Stream-only fields live on the `Stream`
/// variant and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CampaignKind {
    /// One-time challenge with a fixed end date.
    Snapshot {
        #[serde(with = "crate::timestamp")]
        end_date: DateTime<Utc>,
    },
    /// Recurring verification subscription.
    Stream {
        #[serde(with = "crate::timestamp::option")]
        end_date: Option<DateTime<Utc>>,
        frequency: StreamFrequency,
        /// Length of the subscription in days.
        stream_duration: u32,
        dynamic_pricing: bool,
    },
}

/// Discriminant of [`CampaignKind`], used by the static catalogues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Snapshot,
    Stream,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: CampaignStatus,
    pub partner_id: String,
    pub challenge: ChallengeCriteria,
    pub targeting: CohortTargeting,
    pub rewards: CampaignRewards,
    pub funnel: CampaignFunnelData,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: CampaignKind,
}

impl Campaign {
    pub fn campaign_type(&self) -> CampaignType {
        match self.kind {
            CampaignKind::Snapshot { .. } => CampaignType::Snapshot,
            CampaignKind::Stream { .. } => CampaignType::Stream,
        }
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            CampaignKind::Snapshot { end_date } => Some(*end_date),
            CampaignKind::Stream { end_date, .. } => *end_date,
        }
    }
}

/// Starting point offered by the campaign builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub icon: String,
    pub challenge: ChallengeCriteria,
    pub targeting: CohortTargeting,
    pub suggested_budget: u64,
    pub suggested_points: u32,
}

// ============================================================================
// Verifications
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMetadata {
    pub aggregation_type: AggregationType,
    pub time_window_hours: u32,
    pub data_point_count: u32,
}

/// Opaque receipt asserting a verification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReceipt {
    pub id: String,
    pub campaign_id: String,
    pub identity_id: String,
    pub proof_type: ProofType,
    pub proof_hash: String,
    pub status: VerificationStatus,
    pub metric: HealthMetric,
    pub data_sources: Vec<DataSource>,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Present iff `status` is verified.
    #[serde(with = "crate::timestamp::option")]
    pub verified_at: Option<DateTime<Utc>>,
    pub proof_generation_ms: u32,
    pub metadata: VerificationMetadata,
}

// ============================================================================
// Treasury
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryState {
    pub total_budget: f64,
    pub available_balance: f64,
    pub yield_rate: f64,
    pub yield_generated: f64,
    pub value_multiplier: f64,
    pub points_distributed: u64,
    pub points_reserved: u64,
    pub points_expired: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Signed: credits positive, debits negative.
    pub amount: f64,
    /// Running balance after this entry, rounded to cents.
    pub balance: f64,
    pub description: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub partner_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasurySnapshot {
    pub date: NaiveDate,
    pub total_budget: u64,
    pub yield_accrued: f64,
    pub cumulative_yield: f64,
    pub points_distributed: u64,
    pub value_multiplier: f64,
}

// ============================================================================
// Compliance
// ============================================================================

/// Audit log entry. `pii_accessed` is false for every record ever produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub id: String,
    pub event_type: ComplianceEventType,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub partner_id: String,
    pub campaign_id: Option<String>,
    pub proof_hash: Option<String>,
    pub pii_accessed: bool,
    pub ip_hash: String,
    pub user_agent: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProcessingSummary {
    /// `YYYY-MM`.
    pub period: String,
    pub records_processed: u64,
    pub proofs_generated: u64,
    pub proofs_verified: u64,
    pub proofs_failed: u64,
    pub avg_proof_generation_ms: u32,
    pub data_sources_accessed: Vec<DataSource>,
    pub pii_access_events: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot_campaign() -> Campaign {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Campaign {
            id: "cmp_0123abcd".to_string(),
            name: "Steps".to_string(),
            description: "Walk".to_string(),
            status: CampaignStatus::Active,
            partner_id: "partner_a1".to_string(),
            challenge: ChallengeCriteria {
                metric: HealthMetric::Steps,
                operator: ChallengeOperator::Gte,
                target: 8000.0,
                target_max: None,
                unit: "steps".to_string(),
            },
            targeting: CohortTargeting::default(),
            rewards: CampaignRewards {
                points_per_verification: 100,
                budget_ceiling: 25_000,
                budget_spent: 5_000,
                max_participants: 5_000,
            },
            funnel: CampaignFunnelData::default(),
            start_date: start,
            created_at: start,
            kind: CampaignKind::Snapshot {
                end_date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    #[test]
    fn test_campaign_kind_is_flattened_with_type_tag() {
        let json = serde_json::to_value(snapshot_campaign()).unwrap();
        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["endDate"], "2025-02-01T00:00:00.000Z");
        assert_eq!(json["partnerId"], "partner_a1");
        assert!(json.get("frequency").is_none());
        assert!(json["challenge"].get("targetMax").is_none());
    }

    #[test]
    fn test_stream_campaign_roundtrip() {
        let mut campaign = snapshot_campaign();
        campaign.kind = CampaignKind::Stream {
            end_date: None,
            frequency: StreamFrequency::Weekly,
            stream_duration: 90,
            dynamic_pricing: true,
        };

        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["type"], "stream");
        assert_eq!(json["streamDuration"], 90);
        assert_eq!(json["dynamicPricing"], true);
        assert!(json["endDate"].is_null());

        let parsed: Campaign = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, campaign);
        assert_eq!(parsed.campaign_type(), CampaignType::Stream);
        assert_eq!(parsed.end_date(), None);
    }

    #[test]
    fn test_funnel_helpers() {
        let funnel = CampaignFunnelData {
            eligible: 1000,
            invited: 725,
            enrolled: 363,
            verified: 209,
            rewarded: 186,
        };
        assert!(funnel.is_monotonic());
        assert!((funnel.verification_rate() - 209.0 / 363.0).abs() < 1e-12);

        let broken = CampaignFunnelData {
            verified: 400,
            ..funnel
        };
        assert!(!broken.is_monotonic());

        assert_eq!(CampaignFunnelData::default().verification_rate(), 0.0);
    }

    #[test]
    fn test_snapshot_date_serializes_as_plain_date() {
        let snapshot = TreasurySnapshot {
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            total_budget: 150_000,
            yield_accrued: 41.5,
            cumulative_yield: 41.5,
            points_distributed: 15_300,
            value_multiplier: 1.0,
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["date"], "2025-03-09");
    }
}
