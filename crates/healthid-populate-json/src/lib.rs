//! JSON / JSONL exporter for HealthID mock datasets.
//!
//! Writes one file per collection plus a `manifest.json` recording the
//! dataset's `generatedAt`, the format and per-collection counts, and reads
//! such a directory back into a [`Dataset`](healthid_core::Dataset).
//!
//! ```text
//! out/
//!   manifest.json
//!   partners.json | partners.jsonl
//!   identities.json | identities.jsonl
//!   ...
//!   treasury_state.json          (always a single JSON object)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use healthid_populate_json::{JsonPopulator, OutputFormat};
//! use healthid_core::Collection;
//!
//! let populator = JsonPopulator::new(OutputFormat::Jsonl);
//! for (collection, metrics) in populator.populate(&dataset, "out", Collection::ALL)? {
//!     println!("{collection}: {} records in {:?}", metrics.records_written, metrics.total_duration);
//! }
//! let reloaded = healthid_populate_json::load_dataset("out")?;
//! ```

pub mod args;
pub mod error;
pub mod populator;
pub mod reader;

pub use args::{OutputFormat, PopulateArgs};
pub use error::PopulateError;
pub use populator::{collection_path, JsonPopulator, Manifest, PopulateMetrics};
pub use reader::load_dataset;
