//! Writes dataset collections to JSON or JSONL files.

use crate::args::OutputFormat;
use crate::error::PopulateError;
use chrono::{DateTime, Utc};
use healthid_core::{Collection, Dataset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// File name of the export manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Metrics from writing one collection.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent serializing records.
    pub serialize_duration: Duration,
    /// Time spent writing data.
    pub write_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

impl PopulateMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Describes an export directory: when the dataset was generated, in which
/// format, and how many records each collection holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(with = "healthid_core::timestamp")]
    pub generated_at: DateTime<Utc>,
    pub format: OutputFormat,
    /// Record count per collection name.
    pub counts: BTreeMap<String, usize>,
}

impl Manifest {
    pub fn read(dir: &Path) -> Result<Self, PopulateError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(PopulateError::MissingManifest(path));
        }
        Ok(serde_json::from_slice(&fs::read(&path)?)?)
    }

    pub fn count(&self, collection: Collection) -> Option<usize> {
        self.counts.get(collection.name()).copied()
    }
}

/// Path of `collection` inside an export directory.
///
/// The treasury state is a single object and is always written as `.json`.
pub fn collection_path(dir: &Path, collection: Collection, format: OutputFormat) -> PathBuf {
    let format = if collection.is_singleton() {
        OutputFormat::Json
    } else {
        format
    };
    dir.join(format!("{}.{}", collection.name(), format.extension()))
}

/// Writes a [`Dataset`] into a directory, one file per collection.
pub struct JsonPopulator {
    format: OutputFormat,
    buffer_size: usize,
}

impl JsonPopulator {
    /// Create a new populator writing `format` files.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Override the write buffer size.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write `collections` of `dataset` into `output_dir`, then the manifest.
    ///
    /// The directory is created if needed. Existing files are overwritten.
    pub fn populate<P: AsRef<Path>>(
        &self,
        dataset: &Dataset,
        output_dir: P,
        collections: &[Collection],
    ) -> Result<Vec<(Collection, PopulateMetrics)>, PopulateError> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;
        info!(
            "Writing {} collections to '{}' as {}",
            collections.len(),
            output_dir.display(),
            self.format
        );

        let mut results = Vec::with_capacity(collections.len());
        for &collection in collections {
            let metrics = self.write_collection(dataset, output_dir, collection)?;
            results.push((collection, metrics));
        }

        let manifest = Manifest {
            generated_at: dataset.generated_at(),
            format: self.format,
            counts: collections
                .iter()
                .map(|c| (c.name().to_string(), dataset.len_of(*c)))
                .collect(),
        };
        let manifest_path = output_dir.join(MANIFEST_FILE);
        let mut writer = BufWriter::new(File::create(&manifest_path)?);
        serde_json::to_writer_pretty(&mut writer, &manifest)?;
        writeln!(writer)?;
        writer.flush()?;
        debug!("Wrote manifest '{}'", manifest_path.display());

        Ok(results)
    }

    /// Write a single collection file.
    pub fn write_collection(
        &self,
        dataset: &Dataset,
        output_dir: &Path,
        collection: Collection,
    ) -> Result<PopulateMetrics, PopulateError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();
        let path = collection_path(output_dir, collection, self.format);

        let serialize_start = Instant::now();
        let json = dataset.collection_json(collection)?;
        metrics.serialize_duration = serialize_start.elapsed();

        let write_start = Instant::now();
        let file = File::create(&path)?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        match (&json, self.format) {
            (Value::Array(records), OutputFormat::Jsonl) => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                    metrics.records_written += 1;
                }
            }
            (Value::Array(records), OutputFormat::Json) => {
                serde_json::to_writer_pretty(&mut writer, &json)?;
                writeln!(writer)?;
                metrics.records_written = records.len() as u64;
            }
            (_, _) => {
                serde_json::to_writer_pretty(&mut writer, &json)?;
                writeln!(writer)?;
                metrics.records_written = 1;
            }
        }
        writer.flush()?;
        drop(writer);
        metrics.write_duration = write_start.elapsed();

        metrics.file_size_bytes = fs::metadata(&path)?.len();
        metrics.total_duration = start_time.elapsed();

        info!(
            "Wrote '{}': {} records, {} bytes in {:?} ({:.2} records/sec)",
            path.display(),
            metrics.records_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.records_per_second()
        );
        Ok(metrics)
    }
}
