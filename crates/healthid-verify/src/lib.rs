//! Verifier for HealthID mock datasets.
//!
//! A dataset passes when every structural invariant holds (foreign keys
//! resolve, funnels narrow, ledgers balance, collections are in their
//! documented order) and, unless disabled, when every record equals the one
//! the generator produces for the same config and `generatedAt`.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use healthid_core::DatasetConfig;
//! use healthid_generator::generate_dataset;
//! use healthid_verify::DatasetVerifier;
//!
//! let mut config = DatasetConfig::default();
//! config.identities.count = 100;
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
//! let dataset = generate_dataset(&config, now).unwrap();
//!
//! let report = DatasetVerifier::new(config).verify(&dataset).unwrap();
//! assert!(report.is_success(false));
//! ```

pub mod args;
pub mod compare;
pub mod error;
pub mod invariants;
pub mod report;
pub mod verifier;

pub use args::VerifyArgs;
pub use compare::{compare_collection, compare_records, compare_values, CompareResult};
pub use error::VerifyError;
pub use invariants::{check_all, Findings};
pub use report::{FieldMismatch, MismatchInfo, Rule, VerificationReport, Violation};
pub use verifier::DatasetVerifier;
