//! Record comparison against a regenerated dataset.

use crate::report::{FieldMismatch, MismatchInfo};
use healthid_core::Collection;
use serde_json::Value;

/// Result of comparing two values.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareResult {
    /// Values match.
    Match,
    /// Values don't match.
    Mismatch { expected: String, actual: String },
    /// Field is missing.
    Missing,
}

/// Relative tolerance for floats that went through a text round trip.
const FLOAT_TOLERANCE: f64 = 1e-9;

/// Compare an expected JSON value with an actual one.
///
/// Numbers compare with a small tolerance; everything else must be equal.
pub fn compare_values(expected: &Value, actual: Option<&Value>) -> CompareResult {
    let Some(actual) = actual else {
        return if expected.is_null() {
            CompareResult::Match
        } else {
            CompareResult::Missing
        };
    };
    let matches = match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => match (e.as_f64(), a.as_f64()) {
            (Some(e), Some(a)) => (e - a).abs() <= FLOAT_TOLERANCE * e.abs().max(1.0),
            _ => e == a,
        },
        _ => expected == actual,
    };
    if matches {
        CompareResult::Match
    } else {
        CompareResult::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Compare two records field by field. Non-object records compare whole.
pub fn compare_records(expected: &Value, actual: &Value) -> Vec<FieldMismatch> {
    let (Value::Object(e), Value::Object(a)) = (expected, actual) else {
        return match compare_values(expected, Some(actual)) {
            CompareResult::Match => Vec::new(),
            _ => vec![FieldMismatch {
                field: String::new(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            }],
        };
    };

    let mut mismatches: Vec<FieldMismatch> = e
        .iter()
        .filter_map(|(field, ev)| match compare_values(ev, a.get(field)) {
            CompareResult::Match => None,
            CompareResult::Mismatch { expected, actual } => Some(FieldMismatch {
                field: field.clone(),
                expected,
                actual,
            }),
            CompareResult::Missing => Some(FieldMismatch {
                field: field.clone(),
                expected: ev.to_string(),
                actual: "<missing>".to_string(),
            }),
        })
        .collect();

    mismatches.extend(
        a.iter()
            .filter(|(field, av)| !e.contains_key(*field) && !av.is_null())
            .map(|(field, av)| FieldMismatch {
                field: field.clone(),
                expected: "<absent>".to_string(),
                actual: av.to_string(),
            }),
    );
    mismatches
}

/// Outcome of comparing one collection positionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionComparison {
    pub matched: u64,
    pub mismatched: Vec<MismatchInfo>,
    pub missing: u64,
    pub unexpected: u64,
}

/// Compare a collection's JSON (array or singleton object) record by record.
pub fn compare_collection(
    collection: Collection,
    expected: &Value,
    actual: &Value,
) -> CollectionComparison {
    let as_records = |v: &Value| match v {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    };
    let expected = as_records(expected);
    let actual = as_records(actual);

    let mut result = CollectionComparison::default();
    for (index, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        let field_mismatches = compare_records(e, a);
        if field_mismatches.is_empty() {
            result.matched += 1;
        } else {
            result.mismatched.push(MismatchInfo {
                collection,
                index,
                record_id: e.get("id").and_then(Value::as_str).map(str::to_string),
                field_mismatches,
            });
        }
    }
    result.missing = expected.len().saturating_sub(actual.len()) as u64;
    result.unexpected = actual.len().saturating_sub(expected.len()) as u64;
    result
}
