//! HealthID mock dataset generator.
//!
//! Produces the deterministic fixture data behind the HealthID partner
//! dashboards: partners, anonymized identities, campaigns with conversion
//! funnels, verification receipts, treasury ledger and snapshots, compliance
//! audit records and monthly processing summaries.
//!
//! # Crates
//!
//! - `healthid_core` - record types, configuration, cohort queries
//! - `healthid_generator` - seeded streams and per-family generators
//! - `healthid_populate_json` - JSON / JSONL export and reload
//! - `healthid_verify` - invariant checks and regeneration comparison
//!
//! # CLI Usage
//!
//! ```bash
//! # Write every collection as pretty JSON, pinned to a reference date
//! healthid-mockgen generate --output-dir out --now 2025-06-01
//!
//! # Same data as JSON Lines with a config override
//! healthid-mockgen generate -o out --format jsonl --config dataset.yaml --now 2025-06-01
//!
//! # Check an export against its invariants and a fresh regeneration
//! healthid-mockgen verify --input-dir out --config dataset.yaml
//!
//! # Dashboard aggregates for a cohort
//! healthid-mockgen stats --input-dir out --cohort high-value
//! ```

pub mod commands;
pub mod config;

pub use config::{load_config, parse_reference_time, DatasetOpts};
