//! Verify command handler.

use crate::config::load_config;
use anyhow::Context;
use healthid_populate_json::load_dataset;
use healthid_verify::{DatasetVerifier, VerificationReport, VerifyArgs};

/// Load an exported dataset and check it.
///
/// Fails when the report does not pass, after printing the first
/// `max_reported` problems.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<VerificationReport> {
    let config = load_config(args.config.as_deref())?;
    let dataset = load_dataset(&args.input_dir)
        .with_context(|| format!("Failed to load dataset from {:?}", args.input_dir))?;

    let report = DatasetVerifier::new(config)
        .with_compare(!args.invariants_only)
        .verify(&dataset)?;

    print_problems(&report, args.max_reported);
    println!("{}", report.summary(args.strict));
    Ok(report.into_result(args.strict)?)
}

fn print_problems(report: &VerificationReport, limit: usize) {
    let problems = report
        .violations
        .iter()
        .map(ToString::to_string)
        .chain(report.mismatched_records.iter().map(|m| {
            let fields: Vec<String> = m
                .field_mismatches
                .iter()
                .map(|f| format!("{}: expected {}, got {}", f.field, f.expected, f.actual))
                .collect();
            format!(
                "[mismatch] {} {}: {}",
                m.collection,
                m.record_id.clone().unwrap_or_else(|| format!("#{}", m.index)),
                fields.join("; ")
            )
        }));

    let total = report.violations.len() + report.mismatched_records.len();
    for line in problems.take(limit) {
        println!("{line}");
    }
    if total > limit {
        println!("... and {} more", total - limit);
    }
}
