//! Generator configuration.
//!
//! Every entity family owns a `seed` (initial state of its dedicated PRNG
//! stream), a target `count`, and the ordered weight lists used for its
//! categorical draws. Index `i` of a weight list refers to `ALL[i]` of the
//! matching enum in [`crate::types`].
//!
//! `DatasetConfig::default()` reproduces the built-in dataset. A YAML file may
//! override any subset of fields:
//!
//! ```yaml
//! identities:
//!   seed: 42
//!   count: 5000
//! verifications:
//!   count: 1000
//! treasury:
//!   transaction_count: 250
//! ```

use crate::types::{
    AgeRange, ComplianceEventType, DataSource, Gender, ProofType, Region, ReputationTier,
    TransactionType, VerificationStatus,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on any per-family record count.
pub const MAX_COUNT: usize = 1_000_000;

/// Upper bound on any `history_months` window.
pub const MAX_HISTORY_MONTHS: u32 = 1_200;

/// Upper bound on `treasury.snapshot_days`.
pub const MAX_SNAPSHOT_DAYS: u32 = 36_500;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Weight list length does not match its category table
    #[error("Weight table '{table}' has {actual} entries, expected {expected}")]
    WeightCount {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Weight is negative, NaN or infinite
    #[error("Weight table '{table}' contains an invalid weight at index {index}: {value}")]
    InvalidWeight {
        table: &'static str,
        index: usize,
        value: f64,
    },

    /// Every weight in the table is zero
    #[error("Weight table '{table}' sums to zero")]
    ZeroWeights { table: &'static str },

    /// Count outside the accepted bounds
    #[error("'{field}' must be between {min} and {max}, got {actual}")]
    CountOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Monetary amount that is negative, NaN or infinite
    #[error("'{field}' must be a finite non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Range with min above max
    #[error("'{field}' range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}

/// Complete generator configuration, one section per entity family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub identities: IdentityConfig,
    pub campaigns: CampaignConfig,
    pub verifications: VerificationConfig,
    pub compliance: ComplianceConfig,
    pub summaries: SummaryConfig,
    pub treasury: TreasuryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub seed: i32,
    pub count: usize,
    /// Over [`ReputationTier::ALL`]; power-law shaped.
    pub reputation_weights: Vec<f64>,
    /// Over [`DataSource::ALL`]; popularity order.
    pub data_source_weights: Vec<f64>,
    pub gender_weights: Vec<f64>,
    pub age_range_weights: Vec<f64>,
    pub region_weights: Vec<f64>,
    /// Inclusive `[min, max]` verification count per reputation tier.
    pub verification_ranges: Vec<[u32; 2]>,
    /// How far back `createdAt` may reach.
    pub history_months: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 5000,
            reputation_weights: vec![0.40, 0.30, 0.18, 0.09, 0.03],
            data_source_weights: vec![0.30, 0.18, 0.16, 0.12, 0.09, 0.07, 0.05, 0.03],
            gender_weights: vec![0.48, 0.48, 0.04],
            age_range_weights: vec![0.12, 0.26, 0.24, 0.20, 0.12, 0.06],
            region_weights: vec![0.38, 0.28, 0.18, 0.10, 0.06],
            verification_ranges: vec![[0, 8], [3, 20], [10, 50], [25, 120], [60, 300]],
            history_months: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CampaignConfig {
    pub seed: i32,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self { seed: 1337 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerificationConfig {
    pub seed: i32,
    pub count: usize,
    /// Over [`ProofType::ALL`].
    pub proof_type_weights: Vec<f64>,
    /// Over [`VerificationStatus::ALL`].
    pub status_weights: Vec<f64>,
    pub history_months: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            seed: 7331,
            count: 500,
            proof_type_weights: vec![0.55, 0.30, 0.15],
            status_weights: vec![0.85, 0.05, 0.08, 0.02],
            history_months: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComplianceConfig {
    pub seed: i32,
    pub count: usize,
    /// Over [`ComplianceEventType::ALL`].
    pub event_weights: Vec<f64>,
    pub history_months: u32,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            seed: 5555,
            count: 200,
            event_weights: vec![0.25, 0.25, 0.22, 0.08, 0.15, 0.05],
            history_months: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    pub seed: i32,
    /// Number of monthly periods, ending with the current month.
    pub months: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            seed: 5755,
            months: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreasuryConfig {
    pub seed: i32,
    pub transaction_count: usize,
    /// Over [`TransactionType::ALL`].
    pub transaction_weights: Vec<f64>,
    pub opening_balance: f64,
    pub history_months: u32,
    pub snapshot_seed: i32,
    /// Snapshots cover `snapshot_days..=0` days ago, so one more entry than this.
    pub snapshot_days: u32,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            seed: 9001,
            transaction_count: 100,
            transaction_weights: vec![0.20, 0.25, 0.35, 0.10, 0.10],
            opening_balance: 50_000.0,
            history_months: 6,
            snapshot_seed: 9101,
            snapshot_days: 180,
        }
    }
}

impl DatasetConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: DatasetConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check every weight table and count.
    ///
    /// All-zero weight tables are rejected here; the weighted draw itself
    /// would silently always pick the first category.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ids = &self.identities;
        check_weights(
            "identities.reputation_weights",
            &ids.reputation_weights,
            ReputationTier::ALL.len(),
        )?;
        check_weights(
            "identities.data_source_weights",
            &ids.data_source_weights,
            DataSource::ALL.len(),
        )?;
        check_weights("identities.gender_weights", &ids.gender_weights, Gender::ALL.len())?;
        check_weights(
            "identities.age_range_weights",
            &ids.age_range_weights,
            AgeRange::ALL.len(),
        )?;
        check_weights("identities.region_weights", &ids.region_weights, Region::ALL.len())?;
        if ids.verification_ranges.len() != ReputationTier::ALL.len() {
            return Err(ConfigError::WeightCount {
                table: "identities.verification_ranges",
                expected: ReputationTier::ALL.len(),
                actual: ids.verification_ranges.len(),
            });
        }
        for [min, max] in &ids.verification_ranges {
            if min > max {
                return Err(ConfigError::InvertedRange {
                    field: "identities.verification_ranges",
                    min: *min,
                    max: *max,
                });
            }
        }
        check_count("identities.count", ids.count, 1)?;
        check_window(
            "identities.history_months",
            ids.history_months,
            MAX_HISTORY_MONTHS,
        )?;

        let vrf = &self.verifications;
        check_weights(
            "verifications.proof_type_weights",
            &vrf.proof_type_weights,
            ProofType::ALL.len(),
        )?;
        check_weights(
            "verifications.status_weights",
            &vrf.status_weights,
            VerificationStatus::ALL.len(),
        )?;
        check_count("verifications.count", vrf.count, 0)?;
        check_window(
            "verifications.history_months",
            vrf.history_months,
            MAX_HISTORY_MONTHS,
        )?;

        let cpl = &self.compliance;
        check_weights(
            "compliance.event_weights",
            &cpl.event_weights,
            ComplianceEventType::ALL.len(),
        )?;
        check_count("compliance.count", cpl.count, 0)?;
        check_window(
            "compliance.history_months",
            cpl.history_months,
            MAX_HISTORY_MONTHS,
        )?;

        check_count("summaries.months", self.summaries.months, 0)?;

        let tsy = &self.treasury;
        check_weights(
            "treasury.transaction_weights",
            &tsy.transaction_weights,
            TransactionType::ALL.len(),
        )?;
        check_count("treasury.transaction_count", tsy.transaction_count, 0)?;
        check_window(
            "treasury.history_months",
            tsy.history_months,
            MAX_HISTORY_MONTHS,
        )?;
        check_window("treasury.snapshot_days", tsy.snapshot_days, MAX_SNAPSHOT_DAYS)?;
        if !tsy.opening_balance.is_finite() || tsy.opening_balance < 0.0 {
            return Err(ConfigError::InvalidAmount {
                field: "treasury.opening_balance",
                value: tsy.opening_balance,
            });
        }

        Ok(())
    }
}

fn check_weights(table: &'static str, weights: &[f64], expected: usize) -> Result<(), ConfigError> {
    if weights.len() != expected {
        return Err(ConfigError::WeightCount {
            table,
            expected,
            actual: weights.len(),
        });
    }
    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(ConfigError::InvalidWeight {
            table,
            index,
            value,
        });
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(ConfigError::ZeroWeights { table });
    }
    Ok(())
}

fn check_count(field: &'static str, actual: usize, min: usize) -> Result<(), ConfigError> {
    if actual < min || actual > MAX_COUNT {
        return Err(ConfigError::CountOutOfRange {
            field,
            min,
            max: MAX_COUNT,
            actual,
        });
    }
    Ok(())
}

fn check_window(field: &'static str, actual: u32, max: u32) -> Result<(), ConfigError> {
    if actual > max {
        return Err(ConfigError::CountOutOfRange {
            field,
            min: 0,
            max: max as usize,
            actual: actual as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        DatasetConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
identities:
  count: 250
treasury:
  transaction_count: 40
  opening_balance: 1000.0
"#;
        let config = DatasetConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.identities.count, 250);
        assert_eq!(config.identities.seed, 42);
        assert_eq!(config.treasury.transaction_count, 40);
        assert_eq!(config.treasury.seed, 9001);
        assert_eq!(config.verifications, VerificationConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = DatasetConfig::from_yaml("identities:\n  colour: blue\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_weight_count_mismatch() {
        let mut config = DatasetConfig::default();
        config.verifications.status_weights = vec![0.5, 0.5];
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::WeightCount {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let mut config = DatasetConfig::default();
        config.compliance.event_weights = vec![0.0; 6];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroWeights {
                table: "compliance.event_weights"
            })
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = DatasetConfig::default();
        config.identities.gender_weights = vec![0.5, -0.1, 0.6];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_zero_identities_rejected() {
        let mut config = DatasetConfig::default();
        config.identities.count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CountOutOfRange { min: 1, .. })
        ));
    }

    #[test]
    fn test_inverted_verification_range() {
        let mut config = DatasetConfig::default();
        config.identities.verification_ranges[2] = [50, 10];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { min: 50, max: 10, .. })
        ));
    }

    #[test]
    fn test_oversized_snapshot_days_rejected() {
        let mut config = DatasetConfig::default();
        config.treasury.snapshot_days = 120_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CountOutOfRange {
                field: "treasury.snapshot_days",
                max: 36_500,
                ..
            })
        ));

        config.treasury.snapshot_days = MAX_SNAPSHOT_DAYS;
        config.validate().unwrap();
    }

    #[test]
    fn test_oversized_history_window_rejected() {
        let mut config = DatasetConfig::default();
        config.compliance.history_months = MAX_HISTORY_MONTHS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CountOutOfRange {
                field: "compliance.history_months",
                ..
            })
        ));
    }
}
