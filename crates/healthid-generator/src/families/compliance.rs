//! Compliance audit log. No record ever reports PII access.

use crate::generator::GeneratorError;
use crate::generators::timestamp::months_before;
use crate::generators::{
    generate_hash, generate_id, generate_prefixed_hash, random_date, random_item, weighted_item,
};
use crate::prng::{next_float, Mulberry32};
use chrono::{DateTime, Utc};
use healthid_core::{
    Campaign, ComplianceConfig, ComplianceEventType, ComplianceRecord, Partner,
};
use tracing::debug;

/// Audit queries carry a campaign only when their extra draw exceeds this.
pub const AUDIT_CAMPAIGN_THRESHOLD: f64 = 0.4;

/// Hex digits kept from a fresh hash for the IP fingerprint.
pub const IP_HASH_DIGITS: usize = 16;

pub const USER_AGENTS: [&str; 7] = [
    "HealthID-SDK/2.1.0 (Node.js/20.11)",
    "HealthID-SDK/2.0.4 (Node.js/18.19)",
    "HealthID-SDK/2.1.0 (Python/3.12)",
    "HealthID-SDK/1.9.2 (Go/1.22)",
    "HealthID-API/2.1.0 (cURL/8.5)",
    "HealthID-Dashboard/1.0.0 (Chrome/121)",
    "HealthID-Dashboard/1.0.0 (Firefox/122)",
];

fn detail_templates(event: ComplianceEventType) -> &'static [&'static str] {
    match event {
        ComplianceEventType::VerificationRequested => &[
            "Verification request initiated for campaign cohort",
            "Batch verification request submitted via API",
            "Single identity verification requested",
            "Re-verification requested for expired proof",
        ],
        ComplianceEventType::ProofGenerated => &[
            "ZK proof generated successfully",
            "Proof circuit compiled and executed",
            "Proof generated with aggregated data points",
            "Proof generated from connected data source",
        ],
        ComplianceEventType::ProofVerified => &[
            "Proof verification passed all checks",
            "On-chain proof verification confirmed",
            "Proof validated against campaign criteria",
            "Multi-source proof cross-verified",
        ],
        ComplianceEventType::ProofFailed => &[
            "Proof verification failed: insufficient data points",
            "Proof validation error: criteria not met",
            "Proof generation timeout exceeded",
            "Proof rejected: data source unavailable",
        ],
        ComplianceEventType::DataProcessed => &[
            "Batch data processing completed",
            "Data aggregation pipeline executed",
            "Anonymised data summary generated",
            "Data source sync and processing completed",
        ],
        ComplianceEventType::AuditQuery => &[
            "Compliance audit query executed",
            "Audit log export requested",
            "Regulatory compliance check performed",
            "Data retention policy audit completed",
        ],
    }
}

/// Generate the audit log, sorted newest first.
///
/// Any campaign (drafts included) may appear on a record. Fails with
/// [`GeneratorError::EmptyPool`] when `config.count > 0` and there are no
/// partners or no campaigns.
pub fn generate_compliance_records(
    config: &ComplianceConfig,
    partners: &[Partner],
    campaigns: &[Campaign],
    now: DateTime<Utc>,
) -> Result<Vec<ComplianceRecord>, GeneratorError> {
    if config.count > 0 {
        if partners.is_empty() {
            return Err(GeneratorError::EmptyPool {
                family: "compliance",
                pool: "partners",
            });
        }
        if campaigns.is_empty() {
            return Err(GeneratorError::EmptyPool {
                family: "compliance",
                pool: "campaigns",
            });
        }
    }

    let mut rng = Mulberry32::new(config.seed);
    let window_start = months_before(now, config.history_months);
    let mut records = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let event_type = weighted_item(&mut rng, ComplianceEventType::ALL, &config.event_weights);
        let Some(partner) = random_item(&mut rng, partners) else {
            break;
        };

        let has_campaign = event_type != ComplianceEventType::AuditQuery
            || next_float(&mut rng) > AUDIT_CAMPAIGN_THRESHOLD;
        let campaign_id = if has_campaign {
            random_item(&mut rng, campaigns).map(|c| c.id.clone())
        } else {
            None
        };

        let proof_hash = event_type
            .is_proof_related()
            .then(|| generate_prefixed_hash(&mut rng));

        let id = generate_id(&mut rng, "cpl");
        let timestamp = random_date(&mut rng, window_start, now);
        let ip_hash = format!("0x{}", &generate_hash(&mut rng)[..IP_HASH_DIGITS]);
        let user_agent = random_item(&mut rng, &USER_AGENTS)
            .copied()
            .unwrap_or_default();
        let details = random_item(&mut rng, detail_templates(event_type))
            .copied()
            .unwrap_or_default();

        records.push(ComplianceRecord {
            id,
            event_type,
            timestamp,
            partner_id: partner.id.clone(),
            campaign_id,
            proof_hash,
            pii_accessed: false,
            ip_hash,
            user_agent: user_agent.to_string(),
            details: details.to_string(),
        });
    }

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        count = records.len(),
        seed = config.seed,
        "Generated compliance records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::campaigns::generate_campaigns;
    use crate::families::partners::generate_partners;
    use chrono::TimeZone;
    use healthid_core::CampaignConfig;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn records() -> (Vec<Partner>, Vec<Campaign>, Vec<ComplianceRecord>) {
        let partners = generate_partners();
        let campaigns = generate_campaigns(&CampaignConfig::default(), &partners, now()).unwrap();
        let records =
            generate_compliance_records(&ComplianceConfig::default(), &partners, &campaigns, now())
                .unwrap();
        (partners, campaigns, records)
    }

    #[test]
    fn test_record_invariants() {
        let (partners, campaigns, records) = records();
        assert_eq!(records.len(), 200);
        let window_start = months_before(now(), 6);

        for r in &records {
            assert!(!r.pii_accessed);
            assert!(partners.iter().any(|p| p.id == r.partner_id));
            if let Some(campaign_id) = &r.campaign_id {
                assert!(campaigns.iter().any(|c| &c.id == campaign_id));
            } else {
                assert_eq!(r.event_type, ComplianceEventType::AuditQuery);
            }
            assert_eq!(r.proof_hash.is_some(), r.event_type.is_proof_related());
            assert_eq!(r.ip_hash.len(), 2 + IP_HASH_DIGITS);
            assert!(USER_AGENTS.contains(&r.user_agent.as_str()));
            assert!(detail_templates(r.event_type).contains(&r.details.as_str()));
            assert!(r.timestamp >= window_start && r.timestamp <= now());
        }
    }

    #[test]
    fn test_records_sorted_newest_first() {
        let (_, _, records) = records();
        assert!(records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_missing_partners_is_an_error() {
        let result =
            generate_compliance_records(&ComplianceConfig::default(), &[], &[], now());
        assert!(matches!(
            result,
            Err(GeneratorError::EmptyPool { pool: "partners", .. })
        ));
    }
}
