//! Stats command handler: the dashboard aggregates as JSON or YAML.

use crate::config::DatasetOpts;
use anyhow::Context;
use clap::{Args, ValueEnum};
use healthid_core::query::{
    campaign_overview, campaign_verifications, cohort_stats, compliance_stats, score_histogram,
    source_distribution, tier_distribution, CampaignOverview, CohortStats, ComplianceStats,
    ScoreBucket, SourceShare, TierShare,
};
use healthid_core::{Dataset, IdentityFilter};
use healthid_generator::generate_dataset;
use serde::Serialize;
use std::path::PathBuf;

/// Named cohort filters offered by the explorer.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CohortPreset {
    /// Every identity
    #[default]
    All,
    /// Score 75+ in gold, platinum or diamond
    HighValue,
    /// Any consumer wearable source connected
    WearableVerified,
    /// Lab results connected
    LabConfirmed,
}

impl CohortPreset {
    pub fn filter(&self) -> IdentityFilter {
        match self {
            CohortPreset::All => IdentityFilter::default(),
            CohortPreset::HighValue => IdentityFilter::high_value(),
            CohortPreset::WearableVerified => IdentityFilter::wearable_verified(),
            CohortPreset::LabConfirmed => IdentityFilter::lab_confirmed(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatsFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the stats command.
#[derive(Args, Clone, Debug)]
pub struct StatsArgs {
    /// Read an exported dataset instead of generating one
    #[arg(long, short = 'i', env = "HEALTHID_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Cohort to aggregate identities over
    #[arg(long, value_enum, default_value_t = CohortPreset::All)]
    pub cohort: CohortPreset,

    /// Also list the verification receipts of this campaign, newest first
    #[arg(long)]
    pub campaign: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = StatsFormat::Json)]
    pub format: StatsFormat,
}

/// Aggregates for one cohort of a dataset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub generated_at: String,
    pub cohort: CohortStats,
    pub tier_distribution: Vec<TierShare>,
    pub score_histogram: Vec<ScoreBucket>,
    pub source_distribution: Vec<SourceShare>,
    pub campaigns: CampaignOverview,
    pub compliance: ComplianceStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_verifications: Option<Vec<String>>,
}

/// Compute the dashboard aggregates for `cohort`.
pub fn dashboard_stats(
    dataset: &Dataset,
    cohort: &IdentityFilter,
    campaign: Option<&str>,
) -> DashboardStats {
    let members = cohort.apply(dataset.identities());
    DashboardStats {
        generated_at: healthid_core::timestamp::format_iso_millis(&dataset.generated_at()),
        cohort: cohort_stats(&members),
        tier_distribution: tier_distribution(&members),
        score_histogram: score_histogram(&members),
        source_distribution: source_distribution(&members),
        campaigns: campaign_overview(dataset.campaigns()),
        compliance: compliance_stats(dataset.compliance_records()),
        campaign_verifications: campaign.map(|id| {
            campaign_verifications(dataset.verifications(), id)
                .into_iter()
                .map(|r| r.id.clone())
                .collect()
        }),
    }
}

/// Print the aggregates of a generated or exported dataset.
pub fn run_stats(opts: &DatasetOpts, args: &StatsArgs) -> anyhow::Result<()> {
    let dataset = match &args.input_dir {
        Some(dir) => healthid_populate_json::load_dataset(dir)
            .with_context(|| format!("Failed to load dataset from {dir:?}"))?,
        None => {
            let config = opts.load_config()?;
            generate_dataset(&config, opts.reference_time()?)
                .context("Failed to generate dataset")?
        }
    };

    let stats = dashboard_stats(&dataset, &args.cohort.filter(), args.campaign.as_deref());
    tracing::debug!("Cohort {:?} holds {} identities", args.cohort, stats.cohort.size);

    let rendered = match args.format {
        StatsFormat::Json => serde_json::to_string_pretty(&stats)?,
        StatsFormat::Yaml => serde_yaml::to_string(&stats)?,
    };
    println!("{rendered}");
    Ok(())
}
