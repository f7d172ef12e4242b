//! Campaigns built from a fixed catalogue, plus the static template list.
//!
//! The catalogue fixes names, challenges, targeting and budgets. The stream
//! fills in ids, funnel counts, dates and budget spend. Every campaign draws in
//! the same order: id, funnel (skipped for drafts), a start offset, the
//! status-specific date offsets, then budget spend (skipped for drafts).

use crate::generator::GeneratorError;
use crate::generators::timestamp::days_offset;
use crate::generators::{fraction, generate_id, random_int, round_half_up};
use crate::prng::Mulberry32;
use chrono::{DateTime, Utc};
use healthid_core::{
    AgeRange, Campaign, CampaignConfig, CampaignFunnelData, CampaignKind, CampaignRewards,
    CampaignStatus, CampaignTemplate, CampaignType, ChallengeCriteria, ChallengeOperator,
    CohortTargeting, DataSource, Gender, HealthMetric, Partner, Region, ReputationTier,
    StreamFrequency,
};
use rand::RngCore;
use tracing::debug;

// ============================================================================
// Funnel
// ============================================================================

/// Funnel counts for a campaign with `eligible` reachable identities.
///
/// Each stage keeps a random share of the previous one: invited 60-85%,
/// enrolled 35-65%, verified 40-75%, rewarded 80-98%. Drafts consume no draws
/// and report zero for every stage after `eligible`.
pub fn build_funnel<R: RngCore + ?Sized>(
    rng: &mut R,
    eligible: u32,
    status: CampaignStatus,
) -> CampaignFunnelData {
    if status == CampaignStatus::Draft {
        return CampaignFunnelData {
            eligible,
            ..CampaignFunnelData::default()
        };
    }
    let invited = keep_share(rng, eligible, 0.60, 0.25);
    let enrolled = keep_share(rng, invited, 0.35, 0.30);
    let verified = keep_share(rng, enrolled, 0.40, 0.35);
    let rewarded = keep_share(rng, verified, 0.80, 0.18);
    CampaignFunnelData {
        eligible,
        invited,
        enrolled,
        verified,
        rewarded,
    }
}

fn keep_share<R: RngCore + ?Sized>(rng: &mut R, from: u32, base: f64, spread: f64) -> u32 {
    round_half_up(f64::from(from) * fraction(rng, base, spread)) as u32
}

/// Share of the budget ceiling already spent, `(base, spread)` per status.
fn budget_spend_range(status: CampaignStatus) -> Option<(f64, f64)> {
    match status {
        CampaignStatus::Draft => None,
        CampaignStatus::Active => Some((0.15, 0.50)),
        CampaignStatus::Completed => Some((0.75, 0.23)),
        CampaignStatus::Paused => Some((0.10, 0.30)),
    }
}

// ============================================================================
// Catalogue
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum SeedKind {
    Snapshot,
    Stream {
        frequency: StreamFrequency,
        duration_days: u32,
        dynamic_pricing: bool,
    },
}

#[derive(Debug, Clone)]
struct CampaignSeed {
    name: &'static str,
    description: &'static str,
    kind: SeedKind,
    status: CampaignStatus,
    partner_index: usize,
    challenge: ChallengeCriteria,
    targeting: CohortTargeting,
    budget_ceiling: u64,
    points_per_verification: u32,
    max_participants: u32,
    eligible: u32,
}

fn challenge(
    metric: HealthMetric,
    operator: ChallengeOperator,
    target: f64,
    unit: &str,
) -> ChallengeCriteria {
    ChallengeCriteria {
        metric,
        operator,
        target,
        target_max: None,
        unit: unit.to_string(),
    }
}

fn stream(frequency: StreamFrequency, duration_days: u32, dynamic_pricing: bool) -> SeedKind {
    SeedKind::Stream {
        frequency,
        duration_days,
        dynamic_pricing,
    }
}

fn campaign_catalogue() -> Vec<CampaignSeed> {
    use AgeRange::*;
    use ChallengeOperator::*;
    use DataSource::*;
    use HealthMetric::*;

    vec![
        CampaignSeed {
            name: "BMI Range Verification",
            description: "Verify that participant body composition falls within a healthy BMI range using connected wearable data.",
            kind: SeedKind::Snapshot,
            status: CampaignStatus::Draft,
            partner_index: 0,
            challenge: ChallengeCriteria {
                target_max: Some(24.9),
                ..challenge(BodyComposition, Between, 18.5, "%")
            },
            targeting: CohortTargeting {
                health_score_min: Some(50),
                age_ranges: Some(vec![From25To34, From35To44]),
                regions: Some(vec![Region::NorthAmerica]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 15_000,
            points_per_verification: 75,
            max_participants: 2000,
            eligible: 1200,
        },
        CampaignSeed {
            name: "Resting Heart Rate Baseline",
            description: "Establish baseline resting heart rate for participants before a clinical trial enrollment.",
            kind: stream(StreamFrequency::Daily, 14, false),
            status: CampaignStatus::Draft,
            partner_index: 1,
            challenge: challenge(HeartRateResting, Lte, 75.0, "bpm"),
            targeting: CohortTargeting {
                health_score_min: Some(40),
                data_sources: Some(vec![AppleHealth, Garmin, Whoop]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 20_000,
            points_per_verification: 50,
            max_participants: 3000,
            eligible: 2100,
        },
        CampaignSeed {
            name: "Physical Screening Verification",
            description: "Verify that employees have completed a physical screening with acceptable health metrics across key indicators.",
            kind: SeedKind::Snapshot,
            status: CampaignStatus::Active,
            partner_index: 2,
            challenge: challenge(Steps, Gte, 8000.0, "steps"),
            targeting: CohortTargeting {
                health_score_min: Some(45),
                reputation_tiers: Some(ReputationTier::ALL.to_vec()),
                regions: Some(vec![Region::NorthAmerica]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 25_000,
            points_per_verification: 100,
            max_participants: 5000,
            eligible: 3400,
        },
        CampaignSeed {
            name: "Continuous Sleep Quality Monitor",
            description: "Continuously monitor sleep quality scores to ensure participants maintain healthy sleep hygiene throughout the study period.",
            kind: stream(StreamFrequency::Weekly, 90, true),
            status: CampaignStatus::Active,
            partner_index: 1,
            challenge: challenge(SleepQuality, Gte, 70.0, "score"),
            targeting: CohortTargeting {
                health_score_min: Some(50),
                data_sources: Some(vec![Oura, Whoop, AppleHealth, Fitbit]),
                age_ranges: Some(vec![From25To34, From35To44, From45To54]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 35_000,
            points_per_verification: 60,
            max_participants: 4000,
            eligible: 2800,
        },
        CampaignSeed {
            name: "30-Day Activity Streak",
            description: "Challenge participants to maintain at least 30 active minutes daily for 30 consecutive days, verified via wearable data.",
            kind: SeedKind::Snapshot,
            status: CampaignStatus::Active,
            partner_index: 0,
            challenge: challenge(ActiveMinutes, Gte, 30.0, "min"),
            targeting: CohortTargeting {
                reputation_tiers: Some(vec![
                    ReputationTier::Silver,
                    ReputationTier::Gold,
                    ReputationTier::Platinum,
                    ReputationTier::Diamond,
                ]),
                health_score_min: Some(55),
                ..CohortTargeting::default()
            },
            budget_ceiling: 30_000,
            points_per_verification: 120,
            max_participants: 3500,
            eligible: 2600,
        },
        CampaignSeed {
            name: "HRV Wellness Check",
            description: "Weekly heart rate variability checks to screen wellness programme participants for stress resilience.",
            kind: stream(StreamFrequency::Weekly, 60, false),
            status: CampaignStatus::Active,
            partner_index: 2,
            challenge: challenge(Hrv, Gte, 40.0, "ms"),
            targeting: CohortTargeting {
                data_sources: Some(vec![AppleHealth, Garmin, Oura, Whoop]),
                regions: Some(vec![Region::NorthAmerica]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 18_000,
            points_per_verification: 45,
            max_participants: 2500,
            eligible: 1900,
        },
        CampaignSeed {
            name: "Quarterly Lab Results Proof",
            description: "Collect zero-knowledge proofs of quarterly lab results for insurance underwriting without revealing raw data.",
            kind: SeedKind::Snapshot,
            status: CampaignStatus::Completed,
            partner_index: 0,
            challenge: challenge(BloodGlucose, Lte, 100.0, "mg/dL"),
            targeting: CohortTargeting {
                data_sources: Some(vec![LabResults]),
                age_ranges: Some(vec![From35To44, From45To54, From55To64, Over65]),
                regions: Some(vec![Region::NorthAmerica, Region::Europe]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 40_000,
            points_per_verification: 150,
            max_participants: 6000,
            eligible: 4200,
        },
        CampaignSeed {
            name: "Hydration Tracking Study",
            description: "Track daily hydration levels over 8 weeks for a pharma research study on electrolyte supplementation.",
            kind: stream(StreamFrequency::Daily, 56, true),
            status: CampaignStatus::Completed,
            partner_index: 1,
            challenge: challenge(Hydration, Gte, 2500.0, "ml"),
            targeting: CohortTargeting {
                health_score_min: Some(40),
                genders: Some(vec![Gender::Male, Gender::Female]),
                age_ranges: Some(vec![From18To24, From25To34, From35To44]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 22_000,
            points_per_verification: 55,
            max_participants: 3000,
            eligible: 2200,
        },
        CampaignSeed {
            name: "Annual Step Count Review",
            description: "Year-end review verifying cumulative step count achievements for corporate wellness rewards programme.",
            kind: SeedKind::Snapshot,
            status: CampaignStatus::Completed,
            partner_index: 2,
            challenge: challenge(Steps, Gte, 10000.0, "steps"),
            targeting: CohortTargeting {
                regions: Some(vec![Region::NorthAmerica]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 12_000,
            points_per_verification: 80,
            max_participants: 1500,
            eligible: 1100,
        },
        CampaignSeed {
            name: "Stress Score Baseline",
            description: "Paused study collecting daily stress scores for participants during an organisational change programme.",
            kind: stream(StreamFrequency::Daily, 30, false),
            status: CampaignStatus::Paused,
            partner_index: 0,
            challenge: challenge(StressScore, Lte, 60.0, "score"),
            targeting: CohortTargeting {
                health_score_min: Some(35),
                data_sources: Some(vec![Oura, Whoop, Fitbit]),
                age_ranges: Some(vec![From25To34, From35To44, From45To54]),
                ..CohortTargeting::default()
            },
            budget_ceiling: 16_000,
            points_per_verification: 40,
            max_participants: 2000,
            eligible: 1500,
        },
    ]
}

// ============================================================================
// Dates
// ============================================================================

struct CampaignDates {
    created_at: DateTime<Utc>,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

fn days<R: RngCore + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    random_int(rng, min, max)
}

/// Status-specific dates. `start_days_ago` is drawn for every status, and used
/// by active and paused campaigns only.
fn campaign_dates<R: RngCore + ?Sized>(
    rng: &mut R,
    status: CampaignStatus,
    is_snapshot: bool,
    start_days_ago: i64,
    now: DateTime<Utc>,
) -> CampaignDates {
    let start = days_offset(now, -start_days_ago);
    match status {
        CampaignStatus::Draft => {
            let created_at = days_offset(now, -days(rng, 1, 14));
            let start_date = days_offset(now, days(rng, 7, 30));
            let end_date = is_snapshot.then(|| days_offset(start_date, days(rng, 14, 60)));
            CampaignDates {
                created_at,
                start_date,
                end_date,
            }
        }
        CampaignStatus::Active => {
            let created_at = days_offset(start, -days(rng, 3, 14));
            let end_date = is_snapshot.then(|| days_offset(now, days(rng, 14, 90)));
            CampaignDates {
                created_at,
                start_date: start,
                end_date,
            }
        }
        CampaignStatus::Completed => {
            let end = days_offset(now, -days(rng, 5, 60));
            let start_date = days_offset(end, -days(rng, 30, 120));
            let created_at = days_offset(start_date, -days(rng, 3, 14));
            CampaignDates {
                created_at,
                start_date,
                end_date: Some(end),
            }
        }
        CampaignStatus::Paused => CampaignDates {
            created_at: days_offset(start, -days(rng, 3, 14)),
            start_date: start,
            end_date: None,
        },
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Build the catalogue campaigns against `partners`.
///
/// Fails with [`GeneratorError::PartnerNotFound`] if a catalogue entry points
/// past the end of `partners`.
pub fn generate_campaigns(
    config: &CampaignConfig,
    partners: &[Partner],
    now: DateTime<Utc>,
) -> Result<Vec<Campaign>, GeneratorError> {
    let mut rng = Mulberry32::new(config.seed);
    let catalogue = campaign_catalogue();
    let mut campaigns = Vec::with_capacity(catalogue.len());

    for seed in catalogue {
        let id = generate_id(&mut rng, "cmp");
        let partner = partners
            .get(seed.partner_index)
            .ok_or(GeneratorError::PartnerNotFound {
                index: seed.partner_index,
                available: partners.len(),
            })?;
        let funnel = build_funnel(&mut rng, seed.eligible, seed.status);

        let start_days_ago = random_int(&mut rng, 30, 180);
        let is_snapshot = matches!(seed.kind, SeedKind::Snapshot);
        let dates = campaign_dates(&mut rng, seed.status, is_snapshot, start_days_ago, now);

        let budget_spent = match budget_spend_range(seed.status) {
            Some((base, spread)) => {
                round_half_up(seed.budget_ceiling as f64 * fraction(&mut rng, base, spread)) as u64
            }
            None => 0,
        };

        let kind = match seed.kind {
            // Only a paused snapshot lacks an end; it is treated as ending now.
            SeedKind::Snapshot => CampaignKind::Snapshot {
                end_date: dates.end_date.unwrap_or(now),
            },
            SeedKind::Stream {
                frequency,
                duration_days,
                dynamic_pricing,
            } => CampaignKind::Stream {
                end_date: dates.end_date,
                frequency,
                stream_duration: duration_days,
                dynamic_pricing,
            },
        };

        campaigns.push(Campaign {
            id,
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            status: seed.status,
            partner_id: partner.id.clone(),
            challenge: seed.challenge,
            targeting: seed.targeting,
            rewards: CampaignRewards {
                points_per_verification: seed.points_per_verification,
                budget_ceiling: seed.budget_ceiling,
                budget_spent,
                max_participants: seed.max_participants,
            },
            funnel,
            start_date: dates.start_date,
            created_at: dates.created_at,
            kind,
        });
    }

    debug!(
        count = campaigns.len(),
        seed = config.seed,
        "Generated campaigns"
    );
    Ok(campaigns)
}

/// The campaign builder's starting points. Consumes no randomness.
pub fn generate_campaign_templates() -> Vec<CampaignTemplate> {
    vec![
        CampaignTemplate {
            id: "tmpl_phys_screen".to_string(),
            name: "Physical Screening Proof".to_string(),
            description: "Verify completion of a physical screening with acceptable health metrics using zero-knowledge proofs.".to_string(),
            campaign_type: CampaignType::Snapshot,
            icon: "Shield".to_string(),
            challenge: challenge(HealthMetric::Steps, ChallengeOperator::Gte, 8000.0, "steps"),
            targeting: CohortTargeting {
                health_score_min: Some(45),
                regions: Some(vec![Region::NorthAmerica]),
                ..CohortTargeting::default()
            },
            suggested_budget: 25_000,
            suggested_points: 100,
        },
        CampaignTemplate {
            id: "tmpl_sleep_monitor".to_string(),
            name: "Sleep Quality Monitor".to_string(),
            description: "Continuously verify sleep quality scores over time to support sleep hygiene programmes and research studies.".to_string(),
            campaign_type: CampaignType::Stream,
            icon: "Moon".to_string(),
            challenge: challenge(HealthMetric::SleepQuality, ChallengeOperator::Gte, 70.0, "score"),
            targeting: CohortTargeting {
                data_sources: Some(vec![
                    DataSource::Oura,
                    DataSource::Whoop,
                    DataSource::AppleHealth,
                    DataSource::Fitbit,
                ]),
                ..CohortTargeting::default()
            },
            suggested_budget: 35_000,
            suggested_points: 60,
        },
        CampaignTemplate {
            id: "tmpl_activity_streak".to_string(),
            name: "Activity Streak Challenge".to_string(),
            description: "Challenge participants to maintain a daily activity streak, verified through connected wearable data.".to_string(),
            campaign_type: CampaignType::Snapshot,
            icon: "Flame".to_string(),
            challenge: challenge(HealthMetric::ActiveMinutes, ChallengeOperator::Gte, 30.0, "min"),
            targeting: CohortTargeting {
                reputation_tiers: Some(vec![
                    ReputationTier::Silver,
                    ReputationTier::Gold,
                    ReputationTier::Platinum,
                    ReputationTier::Diamond,
                ]),
                health_score_min: Some(55),
                ..CohortTargeting::default()
            },
            suggested_budget: 30_000,
            suggested_points: 120,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::partners::generate_partners;
    use crate::prng::ConstantStream;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_funnel_at_constant_half() {
        let mut rng = ConstantStream::from_fraction(0.5);
        let funnel = build_funnel(&mut rng, 1000, CampaignStatus::Active);
        assert_eq!(
            funnel,
            CampaignFunnelData {
                eligible: 1000,
                invited: 725,
                enrolled: 363,
                verified: 209,
                rewarded: 186,
            }
        );
    }

    #[test]
    fn test_draft_funnel_is_empty_past_eligible() {
        let mut rng = Mulberry32::new(1);
        let funnel = build_funnel(&mut rng, 1200, CampaignStatus::Draft);
        assert_eq!(funnel.eligible, 1200);
        assert_eq!(funnel.stages()[1..], [0, 0, 0, 0]);
        // No draws consumed.
        assert_eq!(rng, Mulberry32::new(1));
    }

    #[test]
    fn test_catalogue_status_mix() {
        let campaigns =
            generate_campaigns(&CampaignConfig::default(), &generate_partners(), now()).unwrap();
        assert_eq!(campaigns.len(), 10);
        let count = |s| campaigns.iter().filter(|c| c.status == s).count();
        assert_eq!(count(CampaignStatus::Draft), 2);
        assert_eq!(count(CampaignStatus::Active), 4);
        assert_eq!(count(CampaignStatus::Completed), 3);
        assert_eq!(count(CampaignStatus::Paused), 1);
    }

    #[test]
    fn test_first_campaign_id_from_seed() {
        let campaigns =
            generate_campaigns(&CampaignConfig::default(), &generate_partners(), now()).unwrap();
        assert_eq!(campaigns[0].id, "cmp_23ca6688");
    }

    #[test]
    fn test_campaign_invariants() {
        let partners = generate_partners();
        let campaigns = generate_campaigns(&CampaignConfig::default(), &partners, now()).unwrap();
        for c in &campaigns {
            assert!(c.funnel.is_monotonic(), "{}", c.name);
            assert!(partners.iter().any(|p| p.id == c.partner_id));
            assert!(c.created_at < c.start_date, "{}", c.name);
            if let Some(end) = c.end_date() {
                assert!(end > c.start_date, "{}", c.name);
            }
            if let Some((base, spread)) = budget_spend_range(c.status) {
                let spent = c.rewards.budget_spent as f64 / c.rewards.budget_ceiling as f64;
                assert!(spent >= base - 0.001 && spent <= base + spread + 0.001);
            }
            match c.status {
                CampaignStatus::Draft => {
                    assert_eq!(c.rewards.budget_spent, 0);
                    assert!(c.start_date > now());
                }
                CampaignStatus::Active => assert!(c.start_date < now()),
                CampaignStatus::Completed => assert!(c.end_date().unwrap() < now()),
                CampaignStatus::Paused => assert!(c.end_date().is_none()),
            }
            if c.campaign_type() == CampaignType::Snapshot {
                assert!(c.end_date().is_some());
            }
        }
    }

    #[test]
    fn test_missing_partner_is_an_error() {
        let partners = generate_partners();
        let result = generate_campaigns(&CampaignConfig::default(), &partners[..1], now());
        assert!(matches!(
            result,
            Err(GeneratorError::PartnerNotFound { index: 1, available: 1 })
        ));
    }

    #[test]
    fn test_templates() {
        let templates = generate_campaign_templates();
        let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["tmpl_phys_screen", "tmpl_sleep_monitor", "tmpl_activity_streak"]
        );
        assert_eq!(templates[1].campaign_type, CampaignType::Stream);
    }
}
