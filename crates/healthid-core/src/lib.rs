//! Core types for the HealthID mock dataset generator.
//!
//! This crate provides the foundational types shared by the generator,
//! verifier and exporters:
//!
//! - [`types`] - closed categorical enums (tiers, sources, statuses, ...)
//! - [`entities`] - record types for every generated collection
//! - [`config`] - per-family seeds, counts and weight tables, loaded from YAML
//! - [`Dataset`] - the immutable, read-only bundle of collections
//! - [`query`] - cohort filters and dashboard aggregates
//!
//! # Architecture
//!
//! ```text
//! healthid-core (this crate)
//!    │
//!    ├─── healthid-generator       (builds a Dataset from a DatasetConfig)
//!    ├─── healthid-verify          (checks Dataset invariants)
//!    └─── healthid-populate-json   (writes Dataset collections to disk)
//! ```

pub mod config;
pub mod dataset;
pub mod entities;
pub mod query;
pub mod timestamp;
pub mod types;

// Re-exports for convenience
pub use config::{
    CampaignConfig, ComplianceConfig, ConfigError, DatasetConfig, IdentityConfig, SummaryConfig,
    TreasuryConfig, VerificationConfig,
};
pub use dataset::{Collection, Collections, Dataset};
pub use entities::{
    Campaign, CampaignFunnelData, CampaignKind, CampaignRewards, CampaignTemplate, CampaignType,
    ChallengeCriteria, CohortTargeting, ComplianceRecord, DataProcessingSummary, DataRetention,
    Demographics, HealthIdentity, NotificationSettings, Partner, PartnerSettings, TreasuryState,
    TreasurySnapshot, TreasuryTransaction, VerificationMetadata, VerificationReceipt,
};
pub use query::IdentityFilter;
pub use types::{
    AgeRange, AggregationType, CampaignStatus, ChallengeOperator, ComplianceEventType, DataSource,
    Gender, HealthMetric, PartnerIndustry, PartnerTier, ProofType, Region, ReputationTier,
    StreamFrequency, TransactionType, VerificationStatus,
};
