//! Verification report types.

use crate::error::VerifyError;
use healthid_core::Collection;
use std::fmt;
use std::time::Duration;

/// Which invariant a [`Violation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A foreign key does not resolve.
    ForeignKey,
    /// A numeric field is outside its allowed range.
    Range,
    /// An id, hash or label does not have the expected shape.
    Format,
    /// Funnel stages are not non-increasing, or a draft has activity.
    Funnel,
    /// Timestamps contradict each other or the reference time.
    CausalOrder,
    /// A field is present or absent where the record kind forbids it.
    Presence,
    /// A ledger balance does not equal the running sum.
    Ledger,
    /// A series that must grow does not.
    Monotonic,
    /// A collection is not in its documented order.
    SortOrder,
    /// Two records share an id.
    DuplicateId,
    /// Derived counts are inconsistent with each other.
    Arithmetic,
    /// A record claims PII was touched.
    Privacy,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::ForeignKey => "foreign_key",
            Rule::Range => "range",
            Rule::Format => "format",
            Rule::Funnel => "funnel",
            Rule::CausalOrder => "causal_order",
            Rule::Presence => "presence",
            Rule::Ledger => "ledger",
            Rule::Monotonic => "monotonic",
            Rule::SortOrder => "sort_order",
            Rule::DuplicateId => "duplicate_id",
            Rule::Arithmetic => "arithmetic",
            Rule::Privacy => "privacy",
        };
        f.write_str(name)
    }
}

/// One broken invariant on one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub collection: Collection,
    /// Record id, or `#index` for records without one.
    pub record: String,
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.rule, self.collection, self.record, self.message
        )
    }
}

/// Information about a field mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    /// Field name.
    pub field: String,
    /// Expected value.
    pub expected: String,
    /// Actual value.
    pub actual: String,
}

/// Information about a record that differs from its regenerated counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchInfo {
    pub collection: Collection,
    /// Position in the collection.
    pub index: usize,
    /// Record id, when the record has one.
    pub record_id: Option<String>,
    /// Field mismatches.
    pub field_mismatches: Vec<FieldMismatch>,
}

/// Verification report.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    /// Records inspected across all collections.
    pub checked: u64,
    /// Broken invariants.
    pub violations: Vec<Violation>,
    /// Suspicious but permitted findings (duplicate ids).
    pub warnings: Vec<Violation>,
    /// Whether records were compared against a regenerated dataset.
    pub compared: bool,
    /// Records that match their regenerated counterpart.
    pub matched: u64,
    /// Records that differ from their regenerated counterpart.
    pub mismatched_records: Vec<MismatchInfo>,
    /// Regenerated records absent from the input.
    pub missing: u64,
    /// Input records with no regenerated counterpart.
    pub unexpected: u64,
    /// Total verification time.
    pub total_duration: Duration,
    /// Time spent regenerating the expected dataset.
    pub generation_duration: Duration,
    /// Time spent checking invariants.
    pub invariant_duration: Duration,
    /// Time spent comparing records.
    pub compare_duration: Duration,
}

impl VerificationReport {
    /// Check if verification passed. Warnings count only when `strict`.
    pub fn is_success(&self, strict: bool) -> bool {
        self.violations.is_empty()
            && self.mismatched_records.is_empty()
            && self.missing == 0
            && self.unexpected == 0
            && (!strict || self.warnings.is_empty())
    }

    /// Turn a failed report into [`VerifyError::VerificationFailed`].
    pub fn into_result(self, strict: bool) -> Result<Self, VerifyError> {
        if self.is_success(strict) {
            Ok(self)
        } else {
            Err(VerifyError::VerificationFailed {
                violations: self.violations.len()
                    + if strict { self.warnings.len() } else { 0 },
                mismatched: self.mismatched_records.len(),
                missing: self.missing as usize,
                unexpected: self.unexpected as usize,
            })
        }
    }

    /// Calculate verification rate (records per second).
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.checked as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get a summary string.
    pub fn summary(&self, strict: bool) -> String {
        if self.is_success(strict) {
            let compared = if self.compared {
                format!(", {} records matched regeneration", self.matched)
            } else {
                String::new()
            };
            format!(
                "Verification PASSED: {} records checked{} ({} warnings) in {:?}",
                self.checked,
                compared,
                self.warnings.len(),
                self.total_duration
            )
        } else {
            format!(
                "Verification FAILED: {} violations, {} mismatched, {} missing, {} unexpected, {} warnings",
                self.violations.len(),
                self.mismatched_records.len(),
                self.missing,
                self.unexpected,
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate_warning() -> Violation {
        Violation {
            collection: Collection::Identities,
            record: "hid_00000000".to_string(),
            rule: Rule::DuplicateId,
            message: "id appears 2 times".to_string(),
        }
    }

    #[test]
    fn test_report_success() {
        let report = VerificationReport {
            checked: 100,
            compared: true,
            matched: 100,
            ..Default::default()
        };
        assert!(report.is_success(true));
    }

    #[test]
    fn test_report_failure_violation() {
        let report = VerificationReport {
            checked: 100,
            violations: vec![Violation {
                rule: Rule::Ledger,
                ..duplicate_warning()
            }],
            ..Default::default()
        };
        assert!(!report.is_success(false));
    }

    #[test]
    fn test_report_failure_missing() {
        let report = VerificationReport {
            checked: 95,
            missing: 5,
            ..Default::default()
        };
        assert!(!report.is_success(false));
    }

    #[test]
    fn test_warnings_fail_only_when_strict() {
        let report = VerificationReport {
            checked: 10,
            warnings: vec![duplicate_warning()],
            ..Default::default()
        };
        assert!(report.is_success(false));
        assert!(!report.is_success(true));
    }

    #[test]
    fn test_into_result() {
        let report = VerificationReport {
            warnings: vec![duplicate_warning()],
            ..Default::default()
        };
        assert!(report.clone().into_result(false).is_ok());
        match report.into_result(true) {
            Err(VerifyError::VerificationFailed { violations, .. }) => assert_eq!(violations, 1),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_report_summary() {
        let report = VerificationReport {
            checked: 100,
            compared: true,
            matched: 100,
            total_duration: Duration::from_secs(2),
            ..Default::default()
        };
        let summary = report.summary(false);
        assert!(summary.contains("PASSED"));
        assert!(summary.contains("100 records matched"));
        assert_eq!(report.records_per_second(), 50.0);
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            duplicate_warning().to_string(),
            "[duplicate_id] identities hid_00000000: id appears 2 times"
        );
    }
}
