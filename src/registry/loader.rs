//! Dataset loading.
//!
//! Reads the comma-separated city dataset into a [`Registry`]. Each data
//! row has the fixed layout `estimated2023, census2020, growthRateRaw,
//! "cityName"`. Rows that cannot be used are skipped and reported as
//! [`LoadIssue`]s rather than aborting the load.

use super::{Registry, RegistryError};
use crate::models::CityRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Problems found while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadIssue {
    #[error("data file {} could not be opened: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading stopped at line {line}: {source}")]
    ReadFailed {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} skipped: {reason}")]
    MalformedRow { line: usize, reason: RowError },

    #[error("line {line} skipped: {source}")]
    Rejected {
        line: usize,
        #[source]
        source: RegistryError,
    },
}

/// Why a data row could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected at least 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid {field} value `{value}`")]
    InvalidNumber { field: &'static str, value: String },

    #[error("missing city name")]
    EmptyName,
}

/// Options controlling how dataset lines are interpreted.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Lines starting with this token are treated as the header.
    pub header_token: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            header_token: "City".to_string(),
        }
    }
}

impl From<&crate::config::DataConfig> for LoaderOptions {
    fn from(config: &crate::config::DataConfig) -> Self {
        Self {
            header_token: config.header_token.clone(),
        }
    }
}

/// Result of a load: the registry, the ordered name list and any issues.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub registry: Registry,
    pub names: Vec<String>,
    pub issues: Vec<LoadIssue>,
}

impl LoadOutcome {
    /// Split into the registry and the ordered list of city names.
    pub fn into_parts(self) -> (Registry, Vec<String>) {
        (self.registry, self.names)
    }

    /// Whether the dataset could not be opened at all.
    pub fn source_unavailable(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, LoadIssue::SourceUnavailable { .. }))
    }

    /// Number of rows that were skipped.
    pub fn skipped_rows(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| {
                matches!(
                    issue,
                    LoadIssue::MalformedRow { .. } | LoadIssue::Rejected { .. }
                )
            })
            .count()
    }
}

/// Load a dataset file.
///
/// A file that cannot be opened yields an empty registry with a
/// [`LoadIssue::SourceUnavailable`] entry.
pub fn load(path: &Path, options: &LoaderOptions) -> LoadOutcome {
    info!("Loading city data from: {}", path.display());

    match File::open(path) {
        Ok(file) => parse_dataset(BufReader::new(file), options),
        Err(source) => {
            warn!("Data file {} unavailable: {}", path.display(), source);
            LoadOutcome {
                issues: vec![LoadIssue::SourceUnavailable {
                    path: path.to_path_buf(),
                    source,
                }],
                ..LoadOutcome::default()
            }
        }
    }
}

/// Parse a dataset from any buffered reader.
pub fn parse_dataset<R: BufRead>(reader: R, options: &LoaderOptions) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(source) => {
                warn!("Failed to read line {}: {}", line_no, source);
                outcome.issues.push(LoadIssue::ReadFailed {
                    line: line_no,
                    source,
                });
                break;
            }
        };

        if is_skippable(&line, &options.header_token) {
            continue;
        }

        let record = match parse_row(&line) {
            Ok(record) => record,
            Err(reason) => {
                warn!("Line {} skipped: {}", line_no, reason);
                outcome.issues.push(LoadIssue::MalformedRow {
                    line: line_no,
                    reason,
                });
                continue;
            }
        };

        match outcome.registry.insert(record) {
            Ok(()) => {}
            Err(source) => {
                warn!("Line {} skipped: {}", line_no, source);
                outcome.issues.push(LoadIssue::Rejected {
                    line: line_no,
                    source,
                });
            }
        }
    }

    outcome.names = outcome.registry.names();
    info!(
        "Loaded {} cities ({} rows skipped)",
        outcome.registry.len(),
        outcome.skipped_rows()
    );

    outcome
}

fn is_skippable(line: &str, header_token: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || (!header_token.is_empty() && trimmed.starts_with(header_token))
}

/// Parse one data row.
///
/// The stored growth rate is the raw fraction times 100; it is not
/// recomputed from the population columns.
fn parse_row(line: &str) -> Result<CityRecord, RowError> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    // Columns past the name are ignored.
    let [estimated, census, growth, name, ..] = fields.as_slice() else {
        return Err(RowError::FieldCount(fields.len()));
    };

    let estimated2023 = parse_count("estimated2023", estimated)?;
    let census2020 = parse_count("census2020", census)?;
    let growth_rate = growth
        .trim()
        .parse::<f64>()
        .ok()
        .map(|raw| raw * 100.0)
        .filter(|rate| rate.is_finite())
        .ok_or_else(|| RowError::InvalidNumber {
            field: "growth rate",
            value: growth.trim().to_string(),
        })?;

    let name = name.trim().trim_matches('"').trim();
    if name.is_empty() {
        return Err(RowError::EmptyName);
    }

    let record = CityRecord::new(name, census2020, estimated2023, growth_rate);
    if let Some(divergence) = record.rate_divergence().filter(|d| d.abs() > 0.01) {
        debug!(
            "{}: stored growth rate differs from population change by {:.3} points",
            name, divergence
        );
    }
    Ok(record)
}

fn parse_count(field: &'static str, raw: &str) -> Result<u64, RowError> {
    raw.trim().parse().map_err(|_| RowError::InvalidNumber {
        field,
        value: raw.trim().to_string(),
    })
}
