//! CLI argument definitions for the JSON exporter.

use clap::{Args, ValueEnum};
use healthid_core::Collection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// On-disk layout of a sequence collection.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON array per file
    #[default]
    Json,
    /// One record per line
    Jsonl,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Arguments for writing a dataset to disk.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Output directory (one file per collection)
    #[arg(long, short = 'o', env = "HEALTHID_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// File format for sequence collections
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Specific collections to write (comma-separated, empty = all)
    #[arg(long, value_delimiter = ',')]
    pub collections: Vec<Collection>,
}

impl PopulateArgs {
    /// Collections selected on the command line, or all of them.
    pub fn selected_collections(&self) -> Vec<Collection> {
        if self.collections.is_empty() {
            Collection::ALL.to_vec()
        } else {
            self.collections.clone()
        }
    }
}
