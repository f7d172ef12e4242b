//! Loads an export directory back into a [`Dataset`].

use crate::args::OutputFormat;
use crate::error::PopulateError;
use crate::populator::{collection_path, Manifest};
use healthid_core::{Collection, Collections, Dataset};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read every collection from a directory written by
/// [`JsonPopulator::populate`](crate::JsonPopulator::populate).
///
/// The manifest supplies the format and the dataset's `generatedAt`. All
/// collections must be present.
pub fn load_dataset<P: AsRef<Path>>(dir: P) -> Result<Dataset, PopulateError> {
    let dir = dir.as_ref();
    let manifest = Manifest::read(dir)?;
    let format = manifest.format;
    info!(
        "Loading {} dataset generated at {} from '{}'",
        format,
        manifest.generated_at,
        dir.display()
    );

    let collections = Collections {
        partners: read_records(dir, Collection::Partners, format)?,
        identities: read_records(dir, Collection::Identities, format)?,
        campaigns: read_records(dir, Collection::Campaigns, format)?,
        campaign_templates: read_records(dir, Collection::CampaignTemplates, format)?,
        verifications: read_records(dir, Collection::Verifications, format)?,
        treasury_state: read_single(dir, Collection::TreasuryState)?,
        treasury_transactions: read_records(dir, Collection::TreasuryTransactions, format)?,
        treasury_snapshots: read_records(dir, Collection::TreasurySnapshots, format)?,
        compliance_records: read_records(dir, Collection::ComplianceRecords, format)?,
        data_processing_summaries: read_records(dir, Collection::DataProcessingSummaries, format)?,
    };
    Ok(Dataset::new(manifest.generated_at, collections))
}

fn open(
    dir: &Path,
    collection: Collection,
    format: OutputFormat,
) -> Result<(BufReader<File>, PathBuf), PopulateError> {
    let path = collection_path(dir, collection, format);
    if !path.is_file() {
        return Err(PopulateError::MissingCollection { collection, path });
    }
    Ok((BufReader::new(File::open(&path)?), path))
}

/// Read a sequence collection in either format.
pub fn read_records<T: DeserializeOwned>(
    dir: &Path,
    collection: Collection,
    format: OutputFormat,
) -> Result<Vec<T>, PopulateError> {
    let (reader, path) = open(dir, collection, format)?;
    let records: Vec<T> = match format {
        OutputFormat::Json => serde_json::from_reader(reader)?,
        OutputFormat::Jsonl => {
            let mut records = Vec::new();
            for (index, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record = serde_json::from_str(&line).map_err(|source| PopulateError::Line {
                    path: path.clone(),
                    line: index + 1,
                    source,
                })?;
                records.push(record);
            }
            records
        }
    };
    debug!("Read {} records from '{}'", records.len(), path.display());
    Ok(records)
}

/// Read a single-object collection.
pub fn read_single<T: DeserializeOwned>(
    dir: &Path,
    collection: Collection,
) -> Result<T, PopulateError> {
    let (reader, _) = open(dir, collection, OutputFormat::Json)?;
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonPopulator;
    use chrono::{TimeZone, Utc};
    use healthid_core::DatasetConfig;
    use healthid_generator::generate_dataset;
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        let mut config = DatasetConfig::default();
        config.identities.count = 60;
        config.verifications.count = 30;
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        generate_dataset(&config, now).unwrap()
    }

    fn assert_same(a: &Dataset, b: &Dataset) {
        assert_eq!(a.generated_at(), b.generated_at());
        assert_eq!(a.partners(), b.partners());
        assert_eq!(a.identities(), b.identities());
        assert_eq!(a.campaigns(), b.campaigns());
        assert_eq!(a.campaign_templates(), b.campaign_templates());
        assert_eq!(a.verifications(), b.verifications());
        assert_eq!(a.treasury_state(), b.treasury_state());
        assert_eq!(a.treasury_transactions(), b.treasury_transactions());
        assert_eq!(a.treasury_snapshots(), b.treasury_snapshots());
        assert_eq!(a.compliance_records(), b.compliance_records());
        assert_eq!(a.data_processing_summaries(), b.data_processing_summaries());
    }

    #[test]
    fn test_load_json_export() {
        let temp_dir = TempDir::new().unwrap();
        let original = dataset();
        JsonPopulator::new(OutputFormat::Json)
            .populate(&original, temp_dir.path(), Collection::ALL)
            .unwrap();
        let loaded = load_dataset(temp_dir.path()).unwrap();
        assert_same(&original, &loaded);
    }

    #[test]
    fn test_load_jsonl_export() {
        let temp_dir = TempDir::new().unwrap();
        let original = dataset();
        JsonPopulator::new(OutputFormat::Jsonl)
            .populate(&original, temp_dir.path(), Collection::ALL)
            .unwrap();
        let loaded = load_dataset(temp_dir.path()).unwrap();
        assert_same(&original, &loaded);
        assert!(loaded.campaign("cmp_23ca6688").is_some());
    }

    #[test]
    fn test_partial_export_cannot_load() {
        let temp_dir = TempDir::new().unwrap();
        JsonPopulator::new(OutputFormat::Json)
            .populate(&dataset(), temp_dir.path(), &[Collection::Identities])
            .unwrap();
        assert!(matches!(
            load_dataset(temp_dir.path()),
            Err(PopulateError::MissingCollection {
                collection: Collection::Partners,
                ..
            })
        ));
    }

    #[test]
    fn test_bad_jsonl_line_reports_position() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partners.jsonl");
        std::fs::write(&path, "{\"id\": 1}\n").unwrap();
        let err = read_records::<healthid_core::Partner>(
            temp_dir.path(),
            Collection::Partners,
            OutputFormat::Jsonl,
        )
        .unwrap_err();
        assert!(matches!(err, PopulateError::Line { line: 1, .. }));
    }
}
