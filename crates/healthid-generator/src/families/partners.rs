//! Static partner catalogue: one account per tier.

use chrono::{DateTime, TimeZone, Utc};
use healthid_core::{
    DataRetention, NotificationSettings, Partner, PartnerIndustry, PartnerSettings, PartnerTier,
    Region,
};

struct PartnerSeed {
    id: &'static str,
    label: &'static str,
    tier: PartnerTier,
    industry: PartnerIndustry,
    api_key_prefix: &'static str,
    /// verification, budget, weekly digest, compliance
    notifications: [bool; 4],
    proof_retention_days: u32,
    audit_log_retention_days: u32,
    allowed_regions: &'static [Region],
    max_concurrent_campaigns: u32,
    /// (year, month, day, hour, minute)
    created_at: (i32, u32, u32, u32, u32),
}

const PARTNER_SEEDS: [PartnerSeed; 3] = [
    PartnerSeed {
        id: "partner_a1",
        label: "Meridian Health Insurance",
        tier: PartnerTier::Enterprise,
        industry: PartnerIndustry::Insurance,
        api_key_prefix: "mhi_live_",
        notifications: [true, true, true, true],
        proof_retention_days: 365,
        audit_log_retention_days: 730,
        allowed_regions: &[Region::NorthAmerica, Region::Europe, Region::AsiaPacific],
        max_concurrent_campaigns: 25,
        created_at: (2024, 6, 15, 10, 30),
    },
    PartnerSeed {
        id: "partner_b2",
        label: "NovaGenix Pharmaceuticals",
        tier: PartnerTier::Professional,
        industry: PartnerIndustry::Pharma,
        api_key_prefix: "ngp_live_",
        notifications: [true, true, true, false],
        proof_retention_days: 180,
        audit_log_retention_days: 365,
        allowed_regions: &[Region::NorthAmerica, Region::Europe],
        max_concurrent_campaigns: 10,
        created_at: (2024, 9, 3, 14, 15),
    },
    PartnerSeed {
        id: "partner_c3",
        label: "BrightWell Corporate Wellness",
        tier: PartnerTier::Starter,
        industry: PartnerIndustry::Employer,
        api_key_prefix: "bcw_live_",
        notifications: [false, true, true, false],
        proof_retention_days: 90,
        audit_log_retention_days: 180,
        allowed_regions: &[Region::NorthAmerica],
        max_concurrent_campaigns: 3,
        created_at: (2025, 1, 20, 9, 0),
    },
];

fn created_at((y, mo, d, h, mi): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// The fixed partner accounts, in catalogue order. Consumes no randomness.
pub fn generate_partners() -> Vec<Partner> {
    PARTNER_SEEDS
        .iter()
        .map(|seed| {
            let [verification_alerts, budget_alerts, weekly_digest, compliance_reports] =
                seed.notifications;
            Partner {
                id: seed.id.to_string(),
                label: seed.label.to_string(),
                tier: seed.tier,
                industry: seed.industry,
                api_key_prefix: seed.api_key_prefix.to_string(),
                settings: PartnerSettings {
                    notifications: NotificationSettings {
                        verification_alerts,
                        budget_alerts,
                        weekly_digest,
                        compliance_reports,
                    },
                    data_retention: DataRetention {
                        proof_retention_days: seed.proof_retention_days,
                        audit_log_retention_days: seed.audit_log_retention_days,
                    },
                    allowed_regions: seed.allowed_regions.to_vec(),
                    max_concurrent_campaigns: seed.max_concurrent_campaigns,
                },
                created_at: created_at(seed.created_at),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthid_core::timestamp::format_iso_millis;

    #[test]
    fn test_one_partner_per_tier() {
        let partners = generate_partners();
        let tiers: Vec<_> = partners.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, PartnerTier::ALL.to_vec());
    }

    #[test]
    fn test_partner_fixture_values() {
        let partners = generate_partners();
        assert_eq!(partners[0].id, "partner_a1");
        assert_eq!(format_iso_millis(&partners[0].created_at), "2024-06-15T10:30:00.000Z");
        assert_eq!(partners[1].settings.data_retention.proof_retention_days, 180);
        assert!(!partners[2].settings.notifications.verification_alerts);
        assert_eq!(partners[2].settings.allowed_regions, vec![Region::NorthAmerica]);
    }
}
