//! Monthly data-processing summaries, oldest period first.

use crate::generators::{clamped_normal, fraction, random_int, random_items, round_half_up};
use crate::prng::Mulberry32;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use healthid_core::{DataProcessingSummary, DataSource, SummaryConfig};
use tracing::debug;

/// Volume growth per month towards the present.
pub const MONTHLY_GROWTH: f64 = 0.15;

pub const AVG_PROOF_MS_MIN: u32 = 150;
pub const AVG_PROOF_MS_MAX: u32 = 600;

/// `YYYY-MM` of the month `months_back` months before `now`'s month.
pub fn period_label(now: DateTime<Utc>, months_back: u32) -> String {
    let month_start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.checked_sub_months(Months::new(months_back)))
        .unwrap_or_else(|| now.date_naive());
    month_start.format("%Y-%m").to_string()
}

/// One summary per month for `config.months` months ending with `now`'s month.
///
/// `proofs_failed` is capped at `proofs_generated - proofs_verified`.
pub fn generate_summaries(config: &SummaryConfig, now: DateTime<Utc>) -> Vec<DataProcessingSummary> {
    let mut rng = Mulberry32::new(config.seed);
    let months = config.months;

    let summaries: Vec<DataProcessingSummary> = (0..months)
        .rev()
        .map(|m| {
            let elapsed = (months - 1 - m) as f64;
            let scale = 1.0 + elapsed * MONTHLY_GROWTH;

            let records_processed =
                round_half_up(random_int(&mut rng, 8000, 15000) as f64 * scale) as u64;
            let proofs_generated =
                round_half_up(records_processed as f64 * fraction(&mut rng, 0.60, 0.20)) as u64;
            let proofs_verified =
                round_half_up(proofs_generated as f64 * fraction(&mut rng, 0.82, 0.10)) as u64;
            let proofs_failed =
                round_half_up(proofs_generated as f64 * fraction(&mut rng, 0.04, 0.06)) as u64;
            let proofs_failed = proofs_failed.min(proofs_generated.saturating_sub(proofs_verified));

            let avg_proof_generation_ms =
                clamped_normal(&mut rng, 310.0, 50.0, AVG_PROOF_MS_MIN, AVG_PROOF_MS_MAX);

            let source_count = random_int(&mut rng, 5, 8) as usize;
            let data_sources_accessed =
                random_items(&mut rng, DataSource::FALLBACK_ORDER, source_count);

            DataProcessingSummary {
                period: period_label(now, m as u32),
                records_processed,
                proofs_generated,
                proofs_verified,
                proofs_failed,
                avg_proof_generation_ms,
                data_sources_accessed,
                pii_access_events: 0,
            }
        })
        .collect();

    debug!(
        count = summaries.len(),
        seed = config.seed,
        "Generated data processing summaries"
    );
    summaries
}
