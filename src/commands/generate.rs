//! Generate command handler.

use crate::config::DatasetOpts;
use anyhow::Context;
use healthid_generator::generate_dataset;
use healthid_populate_json::{JsonPopulator, PopulateArgs};

/// Generate a dataset and write it to the output directory.
pub fn run_generate(opts: &DatasetOpts, args: &PopulateArgs) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let now = opts.reference_time()?;
    tracing::info!(
        "Generating dataset relative to {} (identity seed={}, campaign seed={})",
        now,
        config.identities.seed,
        config.campaigns.seed
    );

    let dataset = generate_dataset(&config, now).context("Failed to generate dataset")?;

    let collections = args.selected_collections();
    let results = JsonPopulator::new(args.format)
        .populate(&dataset, &args.output_dir, &collections)
        .with_context(|| format!("Failed to write dataset to {:?}", args.output_dir))?;

    let records: u64 = results.iter().map(|(_, m)| m.records_written).sum();
    let bytes: u64 = results.iter().map(|(_, m)| m.file_size_bytes).sum();
    tracing::info!(
        "Wrote {} records ({} bytes) in {} files to {}",
        records,
        bytes,
        results.len(),
        args.output_dir.display()
    );
    Ok(())
}
