//! Error types for the dataset verifier.

use thiserror::Error;

/// Errors that can occur during verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Regenerating the expected dataset failed.
    #[error("Generator error: {0}")]
    Generator(#[from] healthid_generator::GeneratorError),

    /// A collection could not be converted to JSON for comparison.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Verification failed.
    #[error(
        "Verification failed: {violations} invariant violations, {mismatched} mismatched, {missing} missing, {unexpected} unexpected"
    )]
    VerificationFailed {
        violations: usize,
        mismatched: usize,
        missing: usize,
        unexpected: usize,
    },
}
