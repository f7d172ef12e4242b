//! Structural invariants every generated dataset must satisfy.
//!
//! Each `check_*` function inspects one collection (plus whatever it
//! references) and appends to a [`Findings`]. Duplicate ids are warnings:
//! ids are random and collisions, while rare, are permitted.

use crate::report::{Rule, Violation};
use chrono::{DateTime, Duration, Utc};
use healthid_core::{
    CampaignStatus, Collection, ComplianceEventType, DataSource, Dataset, DatasetConfig,
    ReputationTier, TransactionType, VerificationStatus,
};
use healthid_generator::families::compliance::IP_HASH_DIGITS;
use healthid_generator::families::identities::{HEALTH_SCORE_MAX, HEALTH_SCORE_MIN};
use healthid_generator::families::summaries::{AVG_PROOF_MS_MAX, AVG_PROOF_MS_MIN};
use healthid_generator::families::verifications::{
    MAX_SOURCES_PER_PROOF, PROOF_MS_MAX, PROOF_MS_MIN,
};
use healthid_generator::generators::hex::{is_lower_hex, HASH_LEN, ID_SUFFIX_LEN};
use std::collections::{HashMap, HashSet};

/// Absolute tolerance for cent-rounded ledger balances.
const LEDGER_TOLERANCE: f64 = 0.011;

/// Violations and warnings collected while checking.
#[derive(Debug, Default)]
pub struct Findings {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl Findings {
    fn violation(
        &mut self,
        collection: Collection,
        record: impl Into<String>,
        rule: Rule,
        message: impl Into<String>,
    ) {
        self.violations.push(Violation {
            collection,
            record: record.into(),
            rule,
            message: message.into(),
        });
    }

    fn check(
        &mut self,
        ok: bool,
        collection: Collection,
        record: &str,
        rule: Rule,
        message: impl FnOnce() -> String,
    ) {
        if !ok {
            self.violation(collection, record, rule, message());
        }
    }
}

/// Run every invariant check over `dataset`.
pub fn check_all(dataset: &Dataset, config: &DatasetConfig) -> Findings {
    let mut findings = Findings::default();
    check_partners(dataset, &mut findings);
    check_identities(dataset, config, &mut findings);
    check_campaigns(dataset, &mut findings);
    check_verifications(dataset, &mut findings);
    check_compliance(dataset, &mut findings);
    check_summaries(dataset, &mut findings);
    check_transactions(dataset, config, &mut findings);
    check_snapshots(dataset, &mut findings);
    findings
}

/// `{prefix}_` followed by eight lowercase hex digits.
pub fn is_valid_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|hex| is_lower_hex(hex, ID_SUFFIX_LEN))
}

/// `0x` followed by `digits` lowercase hex digits.
pub fn is_valid_hash(hash: &str, digits: usize) -> bool {
    hash.strip_prefix("0x")
        .is_some_and(|hex| is_lower_hex(hex, digits))
}

fn check_duplicate_ids<'a>(
    collection: Collection,
    ids: impl Iterator<Item = &'a str>,
    findings: &mut Findings,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    let mut duplicates: Vec<_> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (id, n) in duplicates {
        findings.warnings.push(Violation {
            collection,
            record: id.to_string(),
            rule: Rule::DuplicateId,
            message: format!("id appears {n} times"),
        });
    }
}

fn not_after(at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    at <= now
}

// ============================================================================
// Partners and identities
// ============================================================================

pub fn check_partners(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::Partners;
    let mut seen = HashSet::new();
    for p in dataset.partners() {
        findings.check(seen.insert(p.id.as_str()), c, &p.id, Rule::DuplicateId, || {
            "partner ids must be unique".to_string()
        });
    }
}

pub fn check_identities(dataset: &Dataset, config: &DatasetConfig, findings: &mut Findings) {
    let c = Collection::Identities;
    let now = dataset.generated_at();

    for i in dataset.identities() {
        let id = i.id.as_str();
        findings.check(is_valid_id(id, "hid"), c, id, Rule::Format, || {
            "id is not hid_ + 8 hex digits".to_string()
        });
        findings.check(
            is_valid_id(&i.anonymized_id, "anon"),
            c,
            id,
            Rule::Format,
            || format!("anonymizedId {} is malformed", i.anonymized_id),
        );
        findings.check(
            (HEALTH_SCORE_MIN..=HEALTH_SCORE_MAX).contains(&i.health_score),
            c,
            id,
            Rule::Range,
            || format!("healthScore {} outside [20, 98]", i.health_score),
        );

        let mut sources = i.connected_sources.clone();
        sources.sort();
        sources.dedup();
        findings.check(
            (1..=4).contains(&i.connected_sources.len())
                && sources.len() == i.connected_sources.len(),
            c,
            id,
            Rule::Range,
            || "connectedSources must hold 1-4 distinct sources".to_string(),
        );

        let tier_index = ReputationTier::ALL
            .iter()
            .position(|t| *t == i.reputation_tier)
            .unwrap_or_default();
        if let Some([min, max]) = config.identities.verification_ranges.get(tier_index) {
            findings.check(
                (*min..=*max).contains(&i.verification_count),
                c,
                id,
                Rule::Range,
                || {
                    format!(
                        "verificationCount {} outside [{min}, {max}] for {}",
                        i.verification_count, i.reputation_tier
                    )
                },
            );
        }
        findings.check(i.enrolled_campaigns <= 5, c, id, Rule::Range, || {
            format!("enrolledCampaigns {} above 5", i.enrolled_campaigns)
        });

        findings.check(not_after(i.created_at, now), c, id, Rule::CausalOrder, || {
            "createdAt is after the reference time".to_string()
        });
        match i.last_verified {
            Some(last) => {
                findings.check(i.verification_count > 0, c, id, Rule::Presence, || {
                    "lastVerified set with zero verifications".to_string()
                });
                findings.check(
                    last >= i.created_at && not_after(last, now),
                    c,
                    id,
                    Rule::CausalOrder,
                    || "lastVerified outside [createdAt, now]".to_string(),
                );
            }
            None => findings.check(i.verification_count == 0, c, id, Rule::Presence, || {
                "lastVerified missing despite verifications".to_string()
            }),
        }
    }

    check_duplicate_ids(c, dataset.identities().iter().map(|i| i.id.as_str()), findings);
}

// ============================================================================
// Campaigns
// ============================================================================

pub fn check_campaigns(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::Campaigns;
    for campaign in dataset.campaigns() {
        let id = campaign.id.as_str();
        findings.check(is_valid_id(id, "cmp"), c, id, Rule::Format, || {
            "id is not cmp_ + 8 hex digits".to_string()
        });
        findings.check(
            dataset.partner(&campaign.partner_id).is_some(),
            c,
            id,
            Rule::ForeignKey,
            || format!("partnerId {} does not resolve", campaign.partner_id),
        );

        let funnel = campaign.funnel;
        findings.check(funnel.is_monotonic(), c, id, Rule::Funnel, || {
            format!("funnel stages not non-increasing: {:?}", funnel.stages())
        });
        if campaign.status == CampaignStatus::Draft {
            findings.check(
                funnel.stages()[1..].iter().all(|n| *n == 0),
                c,
                id,
                Rule::Funnel,
                || "draft campaign has funnel activity".to_string(),
            );
            findings.check(
                campaign.rewards.budget_spent == 0,
                c,
                id,
                Rule::Range,
                || "draft campaign has spent budget".to_string(),
            );
        }
        findings.check(
            campaign.rewards.budget_spent <= campaign.rewards.budget_ceiling,
            c,
            id,
            Rule::Range,
            || "budgetSpent exceeds budgetCeiling".to_string(),
        );

        findings.check(
            campaign.created_at <= campaign.start_date,
            c,
            id,
            Rule::CausalOrder,
            || "createdAt is after startDate".to_string(),
        );
        if let Some(end) = campaign.end_date() {
            findings.check(end > campaign.start_date, c, id, Rule::CausalOrder, || {
                "endDate is not after startDate".to_string()
            });
        }
        let now = dataset.generated_at();
        match campaign.status {
            CampaignStatus::Draft => {
                findings.check(campaign.start_date > now, c, id, Rule::CausalOrder, || {
                    "draft campaign has already started".to_string()
                })
            }
            CampaignStatus::Completed => findings.check(
                campaign.end_date().is_some_and(|end| end <= now),
                c,
                id,
                Rule::CausalOrder,
                || "completed campaign has not ended".to_string(),
            ),
            CampaignStatus::Active | CampaignStatus::Paused => {
                findings.check(campaign.start_date <= now, c, id, Rule::CausalOrder, || {
                    format!("{} campaign has not started", campaign.status)
                })
            }
        }
    }
    check_duplicate_ids(c, dataset.campaigns().iter().map(|x| x.id.as_str()), findings);
}

// ============================================================================
// Verifications and compliance
// ============================================================================

pub fn check_verifications(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::Verifications;
    let receipts = dataset.verifications();

    for r in receipts {
        let id = r.id.as_str();
        findings.check(is_valid_id(id, "vrf"), c, id, Rule::Format, || {
            "id is not vrf_ + 8 hex digits".to_string()
        });
        findings.check(
            is_valid_hash(&r.proof_hash, HASH_LEN),
            c,
            id,
            Rule::Format,
            || "proofHash is not 0x + 64 hex digits".to_string(),
        );

        match dataset.campaign(&r.campaign_id) {
            Some(campaign) => {
                findings.check(
                    campaign.status != CampaignStatus::Draft,
                    c,
                    id,
                    Rule::ForeignKey,
                    || format!("references draft campaign {}", campaign.id),
                );
                findings.check(
                    campaign.challenge.metric == r.metric,
                    c,
                    id,
                    Rule::ForeignKey,
                    || "metric differs from the campaign challenge".to_string(),
                );
            }
            None => findings.violation(
                c,
                id,
                Rule::ForeignKey,
                format!("campaignId {} does not resolve", r.campaign_id),
            ),
        }

        match dataset.identity(&r.identity_id) {
            Some(identity) => {
                let pool: &[DataSource] = if identity.connected_sources.is_empty() {
                    DataSource::FALLBACK_ORDER
                } else {
                    &identity.connected_sources
                };
                findings.check(
                    r.data_sources.iter().all(|s| pool.contains(s)),
                    c,
                    id,
                    Rule::ForeignKey,
                    || "dataSources not drawn from the identity's sources".to_string(),
                );
            }
            None => findings.violation(
                c,
                id,
                Rule::ForeignKey,
                format!("identityId {} does not resolve", r.identity_id),
            ),
        }
        findings.check(
            (1..=MAX_SOURCES_PER_PROOF).contains(&r.data_sources.len()),
            c,
            id,
            Rule::Range,
            || format!("{} data sources, expected 1-3", r.data_sources.len()),
        );

        findings.check(
            (PROOF_MS_MIN..=PROOF_MS_MAX).contains(&r.proof_generation_ms),
            c,
            id,
            Rule::Range,
            || format!("proofGenerationMs {} outside [50, 2000]", r.proof_generation_ms),
        );
        match (r.status, r.verified_at) {
            (VerificationStatus::Verified, Some(at)) => {
                let floor = r
                    .timestamp
                    .checked_add_signed(Duration::milliseconds(i64::from(r.proof_generation_ms)));
                findings.check(floor.is_some_and(|f| at >= f), c, id, Rule::CausalOrder, || {
                    "verifiedAt precedes timestamp + proofGenerationMs".to_string()
                });
            }
            (VerificationStatus::Verified, None) => {
                findings.violation(c, id, Rule::Presence, "verified receipt lacks verifiedAt")
            }
            (status, Some(_)) => {
                findings.violation(c, id, Rule::Presence, format!("{status} receipt has verifiedAt"))
            }
            (_, None) => {}
        }
        findings.check(
            not_after(r.timestamp, dataset.generated_at()),
            c,
            id,
            Rule::CausalOrder,
            || "timestamp is after the reference time".to_string(),
        );
    }

    check_sorted_desc(c, receipts.iter().map(|r| (r.id.as_str(), r.timestamp)), findings);
    check_duplicate_ids(c, receipts.iter().map(|r| r.id.as_str()), findings);
}

pub fn check_compliance(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::ComplianceRecords;
    let records = dataset.compliance_records();

    for r in records {
        let id = r.id.as_str();
        findings.check(is_valid_id(id, "cpl"), c, id, Rule::Format, || {
            "id is not cpl_ + 8 hex digits".to_string()
        });
        findings.check(!r.pii_accessed, c, id, Rule::Privacy, || {
            "piiAccessed must be false".to_string()
        });
        findings.check(
            dataset.partner(&r.partner_id).is_some(),
            c,
            id,
            Rule::ForeignKey,
            || format!("partnerId {} does not resolve", r.partner_id),
        );
        match &r.campaign_id {
            Some(campaign_id) => findings.check(
                dataset.campaign(campaign_id).is_some(),
                c,
                id,
                Rule::ForeignKey,
                || format!("campaignId {campaign_id} does not resolve"),
            ),
            None => findings.check(
                r.event_type == ComplianceEventType::AuditQuery,
                c,
                id,
                Rule::Presence,
                || format!("{} record has no campaign", r.event_type),
            ),
        }
        match &r.proof_hash {
            Some(hash) => {
                findings.check(r.event_type.is_proof_related(), c, id, Rule::Presence, || {
                    format!("{} record carries a proof hash", r.event_type)
                });
                findings.check(is_valid_hash(hash, HASH_LEN), c, id, Rule::Format, || {
                    "proofHash is not 0x + 64 hex digits".to_string()
                });
            }
            None => findings.check(!r.event_type.is_proof_related(), c, id, Rule::Presence, || {
                format!("{} record lacks a proof hash", r.event_type)
            }),
        }
        findings.check(is_valid_hash(&r.ip_hash, IP_HASH_DIGITS), c, id, Rule::Format, || {
            "ipHash is not 0x + 16 hex digits".to_string()
        });
    }

    check_sorted_desc(c, records.iter().map(|r| (r.id.as_str(), r.timestamp)), findings);
    check_duplicate_ids(c, records.iter().map(|r| r.id.as_str()), findings);
}

fn check_sorted_desc<'a>(
    collection: Collection,
    mut items: impl Iterator<Item = (&'a str, DateTime<Utc>)>,
    findings: &mut Findings,
) {
    let Some((_, mut prev)) = items.next() else {
        return;
    };
    for (id, ts) in items {
        if ts > prev {
            findings.violation(
                collection,
                id,
                Rule::SortOrder,
                "newer than the record before it; expected newest first",
            );
        }
        prev = ts;
    }
}

// ============================================================================
// Summaries
// ============================================================================

pub fn check_summaries(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::DataProcessingSummaries;
    let summaries = dataset.data_processing_summaries();

    for s in summaries {
        let id = s.period.as_str();
        let well_formed = s.period.len() == 7
            && chrono::NaiveDate::parse_from_str(&format!("{}-01", s.period), "%Y-%m-%d").is_ok();
        findings.check(well_formed, c, id, Rule::Format, || {
            "period is not YYYY-MM".to_string()
        });
        let settled = s.proofs_verified.checked_add(s.proofs_failed);
        findings.check(
            settled.is_some_and(|n| n <= s.proofs_generated),
            c,
            id,
            Rule::Arithmetic,
            || {
                format!(
                    "verified {} + failed {} exceeds generated {}",
                    s.proofs_verified, s.proofs_failed, s.proofs_generated
                )
            },
        );
        findings.check(
            s.proofs_generated <= s.records_processed,
            c,
            id,
            Rule::Arithmetic,
            || "more proofs generated than records processed".to_string(),
        );
        findings.check(
            (AVG_PROOF_MS_MIN..=AVG_PROOF_MS_MAX).contains(&s.avg_proof_generation_ms),
            c,
            id,
            Rule::Range,
            || format!("avgProofGenerationMs {} outside [150, 600]", s.avg_proof_generation_ms),
        );
        findings.check(s.pii_access_events == 0, c, id, Rule::Privacy, || {
            "piiAccessEvents must be 0".to_string()
        });
    }

    for w in summaries.windows(2) {
        findings.check(w[0].period < w[1].period, c, &w[1].period, Rule::SortOrder, || {
            "periods must be strictly ascending".to_string()
        });
    }
}

// ============================================================================
// Treasury
// ============================================================================

fn is_outflow(kind: TransactionType) -> bool {
    matches!(
        kind,
        TransactionType::Distribution | TransactionType::Expiration | TransactionType::Withdrawal
    )
}

pub fn check_transactions(dataset: &Dataset, config: &DatasetConfig, findings: &mut Findings) {
    let c = Collection::TreasuryTransactions;
    let txns = dataset.treasury_transactions();
    let mut running = config.treasury.opening_balance;

    for t in txns {
        let id = t.id.as_str();
        findings.check(is_valid_id(id, "txn"), c, id, Rule::Format, || {
            "id is not txn_ + 8 hex digits".to_string()
        });
        findings.check(
            dataset.partner(&t.partner_id).is_some(),
            c,
            id,
            Rule::ForeignKey,
            || format!("partnerId {} does not resolve", t.partner_id),
        );

        // Outflows may only appear positive when booking them negative
        // would have overdrawn the account.
        let sign_ok = if is_outflow(t.kind) {
            t.amount < 0.0 || running - t.amount < 0.0
        } else {
            t.amount > 0.0
        };
        findings.check(sign_ok, c, id, Rule::Ledger, || {
            format!("{} amount {} has the wrong sign", t.kind, t.amount)
        });

        running += t.amount;
        findings.check(
            (t.balance - running).abs() <= LEDGER_TOLERANCE,
            c,
            id,
            Rule::Ledger,
            || format!("balance {} differs from running sum {running:.2}", t.balance),
        );
        findings.check(t.balance >= 0.0, c, id, Rule::Ledger, || {
            format!("balance {} is negative", t.balance)
        });
    }

    for w in txns.windows(2) {
        findings.check(
            w[0].timestamp <= w[1].timestamp,
            c,
            &w[1].id,
            Rule::SortOrder,
            || "older than the transaction before it; expected chronological".to_string(),
        );
    }
    check_duplicate_ids(c, txns.iter().map(|t| t.id.as_str()), findings);
}

pub fn check_snapshots(dataset: &Dataset, findings: &mut Findings) {
    let c = Collection::TreasurySnapshots;
    let snapshots = dataset.treasury_snapshots();

    if let Some(last) = snapshots.last() {
        let today = dataset.generated_at().date_naive();
        findings.check(last.date == today, c, &last.date.to_string(), Rule::CausalOrder, || {
            format!("last snapshot is not dated {today}")
        });
    }

    for w in snapshots.windows(2) {
        let (prev, cur) = (&w[0], &w[1]);
        let id = cur.date.to_string();
        findings.check(
            prev.date.succ_opt() == Some(cur.date),
            c,
            &id,
            Rule::SortOrder,
            || format!("does not follow {} by one day", prev.date),
        );
        findings.check(
            cur.cumulative_yield > prev.cumulative_yield,
            c,
            &id,
            Rule::Monotonic,
            || "cumulativeYield did not increase".to_string(),
        );
        findings.check(
            cur.points_distributed > prev.points_distributed,
            c,
            &id,
            Rule::Monotonic,
            || "pointsDistributed did not increase".to_string(),
        );
        findings.check(
            cur.total_budget >= prev.total_budget,
            c,
            &id,
            Rule::Monotonic,
            || "totalBudget decreased".to_string(),
        );
        findings.check(
            cur.value_multiplier >= prev.value_multiplier,
            c,
            &id,
            Rule::Monotonic,
            || "valueMultiplier decreased".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use healthid_core::{Collections, Dataset};
    use healthid_generator::generate_dataset;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn config() -> DatasetConfig {
        let mut config = DatasetConfig::default();
        config.identities.count = 400;
        config
    }

    fn collections() -> Collections {
        let dataset = generate_dataset(&config(), now()).unwrap();
        Collections {
            partners: dataset.partners().to_vec(),
            identities: dataset.identities().to_vec(),
            campaigns: dataset.campaigns().to_vec(),
            campaign_templates: dataset.campaign_templates().to_vec(),
            verifications: dataset.verifications().to_vec(),
            treasury_state: dataset.treasury_state().clone(),
            treasury_transactions: dataset.treasury_transactions().to_vec(),
            treasury_snapshots: dataset.treasury_snapshots().to_vec(),
            compliance_records: dataset.compliance_records().to_vec(),
            data_processing_summaries: dataset.data_processing_summaries().to_vec(),
        }
    }

    fn rules(findings: &Findings) -> Vec<Rule> {
        findings.violations.iter().map(|v| v.rule).collect()
    }

    #[test]
    fn test_generated_dataset_is_clean() {
        let dataset = generate_dataset(&config(), now()).unwrap();
        let findings = check_all(&dataset, &config());
        assert!(findings.violations.is_empty(), "{:#?}", findings.violations);
    }

    #[test]
    fn test_broken_funnel_detected() {
        let mut cols = collections();
        let active = cols
            .campaigns
            .iter_mut()
            .find(|c| c.status == CampaignStatus::Active)
            .unwrap();
        active.funnel.rewarded = active.funnel.verified + 1;
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert_eq!(rules(&findings), vec![Rule::Funnel]);
    }

    #[test]
    fn test_dangling_foreign_key_detected() {
        let mut cols = collections();
        cols.verifications[0].campaign_id = "cmp_ffffffff".to_string();
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert_eq!(rules(&findings), vec![Rule::ForeignKey]);
    }

    #[test]
    fn test_verified_at_before_proof_detected() {
        let mut cols = collections();
        let receipt = cols
            .verifications
            .iter_mut()
            .find(|r| r.status == VerificationStatus::Verified)
            .unwrap();
        receipt.verified_at = Some(receipt.timestamp);
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert_eq!(rules(&findings), vec![Rule::CausalOrder]);
    }

    #[test]
    fn test_tampered_balance_detected() {
        let mut cols = collections();
        cols.treasury_transactions[10].balance += 5.0;
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert_eq!(rules(&findings), vec![Rule::Ledger]);
    }

    #[test]
    fn test_unsorted_receipts_detected() {
        let mut cols = collections();
        cols.verifications.reverse();
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert!(rules(&findings).contains(&Rule::SortOrder));
    }

    #[test]
    fn test_pii_access_detected() {
        let mut cols = collections();
        cols.compliance_records[0].pii_accessed = true;
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert_eq!(rules(&findings), vec![Rule::Privacy]);
    }

    #[test]
    fn test_duplicate_identity_is_warning() {
        let mut cols = collections();
        let first = cols.identities[0].clone();
        cols.identities.push(first);
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert!(findings.violations.is_empty());
        assert_eq!(findings.warnings.len(), 1);
        assert_eq!(findings.warnings[0].rule, Rule::DuplicateId);
    }

    #[test]
    fn test_id_and_hash_shapes() {
        assert!(is_valid_id("cmp_23ca6688", "cmp"));
        assert!(!is_valid_id("cmp_23CA6688", "cmp"));
        assert!(!is_valid_id("cmpx23ca6688", "cmp"));
        assert!(!is_valid_id("hid_23ca6688", "cmp"));
        assert!(is_valid_hash(&format!("0x{}", "a".repeat(64)), 64));
        assert!(!is_valid_hash(&"a".repeat(64), 64));
    }

    #[test]
    fn test_overflowing_summary_counts_reported() {
        let mut cols = collections();
        let summary = &mut cols.data_processing_summaries[0];
        summary.proofs_verified = u64::MAX;
        summary.proofs_failed = 1;
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert!(findings
            .violations
            .iter()
            .any(|v| v.rule == Rule::Arithmetic && v.message.contains("exceeds generated")));
    }

    #[test]
    fn test_snapshot_after_last_calendar_day_reported() {
        let mut cols = collections();
        let snapshots = &mut cols.treasury_snapshots;
        let n = snapshots.len();
        snapshots[n - 2].date = chrono::NaiveDate::MAX;
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert!(findings
            .violations
            .iter()
            .any(|v| v.rule == Rule::SortOrder && v.message.contains("by one day")));
    }

    #[test]
    fn test_snapshot_date_from_export_at_calendar_limit() {
        let mut cols = collections();
        let mut json = serde_json::to_value(&cols.treasury_snapshots[0]).unwrap();
        json["date"] = serde_json::Value::String("+262142-12-31".to_string());
        cols.treasury_snapshots[0] = serde_json::from_value(json).unwrap();
        let findings = check_all(&Dataset::new(now(), cols), &config());
        assert!(rules(&findings).contains(&Rule::SortOrder));
    }
}
