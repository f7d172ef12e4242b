//! Dataset verifier implementation.

use crate::compare::compare_collection;
use crate::error::VerifyError;
use crate::invariants::check_all;
use crate::report::VerificationReport;
use healthid_core::{Collection, Dataset, DatasetConfig};
use healthid_generator::generate_dataset;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Checks a dataset's invariants and, optionally, that it is exactly what
/// the generator produces for the same config and reference time.
pub struct DatasetVerifier {
    config: DatasetConfig,
    /// When false, records are not compared against a regenerated dataset.
    compare: bool,
}

impl DatasetVerifier {
    /// Create a verifier for datasets generated from `config`.
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            compare: true,
        }
    }

    /// Enable or disable the regenerate-and-compare pass.
    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Verify `dataset`.
    ///
    /// The expected dataset is regenerated with the dataset's own
    /// `generated_at`, so an export can be checked long after it was written.
    pub fn verify(&self, dataset: &Dataset) -> Result<VerificationReport, VerifyError> {
        let start_time = Instant::now();
        let mut report = VerificationReport {
            checked: Collection::ALL.iter().map(|c| dataset.len_of(*c) as u64).sum(),
            ..Default::default()
        };

        info!(
            "Starting verification of {} records generated at {}",
            report.checked,
            dataset.generated_at()
        );

        let invariant_start = Instant::now();
        let findings = check_all(dataset, &self.config);
        report.invariant_duration = invariant_start.elapsed();
        report.violations = findings.violations;
        report.warnings = findings.warnings;
        for warning in &report.warnings {
            warn!("{warning}");
        }
        debug!(
            "Invariant checks: {} violations, {} warnings in {:?}",
            report.violations.len(),
            report.warnings.len(),
            report.invariant_duration
        );

        if self.compare {
            self.compare_with_regenerated(dataset, &mut report)?;
        }

        report.total_duration = start_time.elapsed();
        info!(
            "Verification complete: {} records in {:?} - {} violations, {} matched, {} mismatched, {} missing, {} unexpected",
            report.checked,
            report.total_duration,
            report.violations.len(),
            report.matched,
            report.mismatched_records.len(),
            report.missing,
            report.unexpected
        );
        Ok(report)
    }

    fn compare_with_regenerated(
        &self,
        dataset: &Dataset,
        report: &mut VerificationReport,
    ) -> Result<(), VerifyError> {
        let gen_start = Instant::now();
        let expected = generate_dataset(&self.config, dataset.generated_at())?;
        report.generation_duration = gen_start.elapsed();

        let compare_start = Instant::now();
        for collection in Collection::ALL.iter().copied() {
            let result = compare_collection(
                collection,
                &expected.collection_json(collection)?,
                &dataset.collection_json(collection)?,
            );
            if !result.mismatched.is_empty() || result.missing > 0 || result.unexpected > 0 {
                debug!(
                    "{collection}: {} matched, {} mismatched, {} missing, {} unexpected",
                    result.matched,
                    result.mismatched.len(),
                    result.missing,
                    result.unexpected
                );
            }
            report.matched += result.matched;
            report.missing += result.missing;
            report.unexpected += result.unexpected;
            report.mismatched_records.extend(result.mismatched);
        }
        report.compare_duration = compare_start.elapsed();
        report.compared = true;
        Ok(())
    }
}
