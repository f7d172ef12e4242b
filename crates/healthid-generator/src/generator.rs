//! Composition root: runs every entity family in dependency order.

use crate::families::{campaigns, compliance, identities, partners, summaries, treasury, verifications};
use chrono::{DateTime, Utc};
use healthid_core::{Collections, ConfigError, Dataset, DatasetConfig};
use std::time::Instant;
use tracing::{debug, info};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A catalogue entry references a partner that was not generated
    #[error("Partner index {index} out of range ({available} partners available)")]
    PartnerNotFound { index: usize, available: usize },

    /// A family needs at least one record from a prerequisite collection
    #[error("Cannot generate {family}: no {pool} to reference")]
    EmptyPool {
        family: &'static str,
        pool: &'static str,
    },
}

/// Generate a complete dataset relative to `now`.
///
/// The same `config` and `now` always produce the same dataset. Each family
/// runs on its own seeded stream, after the families it references:
///
/// ```text
/// partners ─┬─> campaigns ─┬─> verifications (+ identities)
///           │              └─> compliance records
///           └─> treasury transactions
/// identities, treasury snapshots, summaries: independent
/// ```
pub fn generate_dataset(
    config: &DatasetConfig,
    now: DateTime<Utc>,
) -> Result<Dataset, GeneratorError> {
    config.validate()?;
    let start = Instant::now();

    let partners = partners::generate_partners();
    let identities = identities::generate_identities(&config.identities, now);
    let campaigns = campaigns::generate_campaigns(&config.campaigns, &partners, now)?;
    let campaign_templates = campaigns::generate_campaign_templates();
    let verifications =
        verifications::generate_verifications(&config.verifications, &campaigns, &identities, now)?;
    let treasury_transactions = treasury::generate_transactions(&config.treasury, &partners, now)?;
    let treasury_snapshots = treasury::generate_snapshots(&config.treasury, now);
    let compliance_records =
        compliance::generate_compliance_records(&config.compliance, &partners, &campaigns, now)?;
    let data_processing_summaries = summaries::generate_summaries(&config.summaries, now);

    debug!(
        partners = partners.len(),
        templates = campaign_templates.len(),
        "Static catalogues loaded"
    );

    let dataset = Dataset::new(
        now,
        Collections {
            partners,
            identities,
            campaigns,
            campaign_templates,
            verifications,
            treasury_state: treasury::treasury_state(),
            treasury_transactions,
            treasury_snapshots,
            compliance_records,
            data_processing_summaries,
        },
    );

    info!(
        identities = dataset.identities().len(),
        campaigns = dataset.campaigns().len(),
        verifications = dataset.verifications().len(),
        compliance_records = dataset.compliance_records().len(),
        transactions = dataset.treasury_transactions().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generated dataset"
    );
    Ok(dataset)
}
