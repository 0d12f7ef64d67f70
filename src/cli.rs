//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// TxPopDash - Texas cities population dashboard
///
/// Query 2020 census and 2023 estimated population figures for Texas
/// cities from an interactive prompt.
///
/// Examples:
///   txpopdash
///   txpopdash --data ./citiesData.csv
///   txpopdash --format json < commands.txt
///   txpopdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the city dataset (CSV)
    ///
    /// Defaults to the path in .txpopdash.toml, or citiesData.csv.
    #[arg(short, long, value_name = "FILE", env = "TXPOPDASH_DATA")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .txpopdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format (text, json)
    ///
    /// JSON prints one object per result and suppresses prompts.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Draw a text histogram after `show growth data`
    #[arg(long, conflicts_with = "no_plot")]
    pub plot: bool,

    /// Never draw the histogram
    #[arg(long, conflicts_with = "plot")]
    pub no_plot: bool,

    /// Number of histogram bins
    #[arg(long, value_name = "COUNT")]
    pub bins: Option<usize>,

    /// Generate a default .txpopdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for dispatch results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text messages (default)
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.bins == Some(0) {
            return Err("Histogram bins must be at least 1".to_string());
        }

        // A missing data file is reported at load time; a directory never works.
        if let Some(ref data) = self.data {
            if data.is_dir() {
                return Err(format!("Data path is a directory: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_args() -> Args {
        Args {
            data: None,
            config: None,
            verbose: false,
            quiet: false,
            format: None,
            plot: false,
            no_plot: false,
            bins: None,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        assert!(args.validate().is_ok());

        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_bins() {
        let mut args = make_args();
        args.bins = Some(0);
        assert!(args.validate().is_err());

        args.bins = Some(5);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = make_args();

        args.data = Some(temp_dir.path().to_path_buf());
        assert!(args.validate().is_err());

        // Missing files are allowed; the dashboard starts empty.
        args.data = Some(temp_dir.path().join("missing.csv"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::WARN);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "txpopdash",
            "--data",
            "cities.csv",
            "--format",
            "json",
            "--no-plot",
            "--bins",
            "12",
        ])
        .unwrap();

        assert_eq!(args.data, Some(PathBuf::from("cities.csv")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.no_plot);
        assert_eq!(args.bins, Some(12));

        assert!(Args::try_parse_from(["txpopdash", "--plot", "--no-plot"]).is_err());
    }
}
