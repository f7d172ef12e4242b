//! Deterministic generator for the HealthID mock dataset.
//!
//! Every collection is derived from a [`DatasetConfig`] and an explicit
//! reference time. Each entity family draws from its own [`Mulberry32`]
//! stream, so the same seeds reproduce the same records byte for byte.
//!
//! # Architecture
//!
//! ```text
//! DatasetConfig (YAML) + now
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │  generate_dataset    │
//! │                      │
//! │  - validate config   │
//! │  - one stream/family │
//! │  - dependency order  │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!    Dataset { partners, identities, campaigns, ... }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use healthid_core::DatasetConfig;
//! use healthid_generator::generate_dataset;
//!
//! let mut config = DatasetConfig::default();
//! config.identities.count = 100;
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
//! let dataset = generate_dataset(&config, now).unwrap();
//! assert_eq!(dataset.campaigns().len(), 10);
//! ```
//!
//! # Modules
//!
//! - [`prng`] - the Mulberry32 stream
//! - [`generators`] - sampling primitives (ranges, weighted choice, normal
//!   draws, hex ids, timestamps)
//! - [`families`] - one generator per entity family

pub mod families;
pub mod generator;
pub mod generators;
pub mod prng;

// Re-exports for convenience
pub use generator::{generate_dataset, GeneratorError};
pub use prng::{ConstantStream, Mulberry32};

pub use healthid_core::{Dataset, DatasetConfig};
