//! CLI argument definitions for the dataset verifier.

use clap::Args;
use std::path::PathBuf;

/// Arguments for verifying an exported dataset.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Directory holding the exported collections
    #[arg(long, short = 'i', env = "HEALTHID_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Config YAML the dataset was generated from (defaults to built-in seeds)
    #[arg(long, short = 'c', env = "HEALTHID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only check invariants; skip regenerating and comparing records
    #[arg(long)]
    pub invariants_only: bool,

    /// Treat warnings (e.g. duplicate ids) as failures
    #[arg(long)]
    pub strict: bool,

    /// Maximum number of individual problems to print
    #[arg(long, default_value = "20")]
    pub max_reported: usize,
}
