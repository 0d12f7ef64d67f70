//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.txpopdash.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".txpopdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Output settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Dataset location and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the city dataset.
    #[serde(default = "default_data_path")]
    pub path: String,

    /// Lines starting with this token are skipped as the header.
    #[serde(default = "default_header_token")]
    pub header_token: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            header_token: default_header_token(),
        }
    }
}

fn default_data_path() -> String {
    "citiesData.csv".to_string()
}

fn default_header_token() -> String {
    "City".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format for results.
    #[serde(default)]
    pub format: OutputFormat,

    /// Draw a histogram after `show growth data`.
    #[serde(default = "default_true")]
    pub plot: bool,

    /// Number of histogram bins.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Width in characters of the longest histogram bar.
    #[serde(default = "default_histogram_width")]
    pub histogram_width: usize,

    /// Decimals shown for growth percentages.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            plot: true,
            histogram_bins: default_histogram_bins(),
            histogram_width: default_histogram_width(),
            precision: default_precision(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_histogram_bins() -> usize {
    20
}

fn default_histogram_width() -> usize {
    40
}

fn default_precision() -> usize {
    2
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.txpopdash.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.path = data.display().to_string();
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }

        if args.plot {
            self.report.plot = true;
        } else if args.no_plot {
            self.report.plot = false;
        }

        if let Some(bins) = args.bins {
            self.report.histogram_bins = bins;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
