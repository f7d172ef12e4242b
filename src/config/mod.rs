//! Dataset configuration shared by the commands.

pub mod reference_time;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use healthid_core::DatasetConfig;
use std::path::{Path, PathBuf};

pub use reference_time::{parse_reference_time, wall_clock};

/// Options selecting what dataset to generate.
#[derive(Args, Clone, Debug, Default)]
pub struct DatasetOpts {
    /// Config YAML overriding the built-in seeds, counts and weights
    #[arg(long, short = 'c', env = "HEALTHID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference time, RFC 3339 or YYYY-MM-DD (defaults to the current time)
    #[arg(long, env = "HEALTHID_NOW")]
    pub now: Option<String>,
}

impl DatasetOpts {
    pub fn load_config(&self) -> anyhow::Result<DatasetConfig> {
        load_config(self.config.as_deref())
    }

    pub fn reference_time(&self) -> anyhow::Result<DateTime<Utc>> {
        match &self.now {
            Some(s) => parse_reference_time(s),
            None => Ok(wall_clock()),
        }
    }
}

/// Load and validate a config file, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DatasetConfig> {
    let config = match path {
        Some(path) => DatasetConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => DatasetConfig::default(),
    };
    config.validate().context("Invalid dataset config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config, DatasetConfig::default());
    }

    #[test]
    fn test_partial_override_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "identities:\n  count: 75\ntreasury:\n  seed: 1").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.identities.count, 75);
        assert_eq!(config.identities.seed, 42);
        assert_eq!(config.treasury.seed, 1);
    }

    #[test]
    fn test_invalid_file_has_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "identities:\n  gender_weights: [0.0, 0.0, 0.0]").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid dataset config"));
    }

    #[test]
    fn test_reference_time_option() {
        let opts = DatasetOpts {
            config: None,
            now: Some("2025-06-01".to_string()),
        };
        assert_eq!(
            opts.reference_time().unwrap().to_rfc3339(),
            "2025-06-01T00:00:00+00:00"
        );
    }
}
