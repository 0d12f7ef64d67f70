//! Data models for the population dashboard.
//!
//! This module contains the record and figure types shared by the
//! registry, the analysis engines and the output renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry key of the synthetic statewide aggregate.
pub const STATEWIDE_KEY: &str = "Texas";

/// Percent change between two population counts.
///
/// Returns `None` when `base` is zero.
pub fn percent_change(base: u64, current: u64) -> Option<f64> {
    if base == 0 {
        return None;
    }
    Some((current as f64 - base as f64) / base as f64 * 100.0)
}

/// Population figures for one city or for the statewide aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// Canonical (title-cased) name.
    pub name: String,
    /// Population counted in the 2020 census.
    pub census2020: u64,
    /// Estimated population in 2023.
    pub estimated2023: u64,
    /// Growth rate in percent, as supplied by the dataset.
    pub growth_rate: f64,
}

impl CityRecord {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, census2020: u64, estimated2023: u64, growth_rate: f64) -> Self {
        Self {
            name: name.into(),
            census2020,
            estimated2023,
            growth_rate,
        }
    }

    /// Growth rate recomputed from the two population figures.
    pub fn derived_growth_rate(&self) -> Option<f64> {
        percent_change(self.census2020, self.estimated2023)
    }

    /// Stored rate minus the recomputed rate.
    ///
    /// Non-zero when the dataset's growth column disagrees with its own
    /// population columns.
    pub fn rate_divergence(&self) -> Option<f64> {
        self.derived_growth_rate()
            .map(|derived| self.growth_rate - derived)
    }

    /// Whether this record is the statewide aggregate.
    pub fn is_statewide(&self) -> bool {
        self.name == STATEWIDE_KEY
    }
}

/// The figure a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// 2020 census population.
    Census,
    /// 2023 estimated population.
    Estimated,
    /// Percent change from 2020 to 2023.
    Growth,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Census => write!(f, "census"),
            Metric::Estimated => write!(f, "estimated"),
            Metric::Growth => write!(f, "growth"),
        }
    }
}

/// Whether a figure describes one city or the whole state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    City,
    Statewide,
}

/// Value carried by a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FigureValue {
    Population(u64),
    Percent(f64),
}

/// A single answered query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub metric: Metric,
    pub scope: Scope,
    pub name: String,
    pub value: FigureValue,
}

impl Figure {
    /// Extracts the requested metric from a record.
    pub fn from_record(record: &CityRecord, metric: Metric) -> Self {
        let value = match metric {
            Metric::Census => FigureValue::Population(record.census2020),
            Metric::Estimated => FigureValue::Population(record.estimated2023),
            Metric::Growth => FigureValue::Percent(record.growth_rate),
        };
        let scope = if record.is_statewide() {
            Scope::Statewide
        } else {
            Scope::City
        };

        Self {
            metric,
            scope,
            name: record.name.clone(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change() {
        assert!((percent_change(100, 110).unwrap() - 10.0).abs() < 1e-9);
        assert!((percent_change(200, 150).unwrap() + 25.0).abs() < 1e-9);
        assert_eq!(percent_change(0, 10), None);
    }

    #[test]
    fn test_rate_divergence() {
        // Stored 12% against a derived 10%.
        let record = CityRecord::new("Acity", 100, 110, 12.0);
        let divergence = record.rate_divergence().unwrap();
        assert!((divergence - 2.0).abs() < 1e-9);

        let consistent = CityRecord::new("Bcity", 100, 110, 10.0);
        assert!(consistent.rate_divergence().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_figure_from_record() {
        let record = CityRecord::new("Austin", 961_855, 979_882, 1.87);

        let census = Figure::from_record(&record, Metric::Census);
        assert_eq!(census.scope, Scope::City);
        assert_eq!(census.value, FigureValue::Population(961_855));

        let growth = Figure::from_record(&record, Metric::Growth);
        assert_eq!(growth.value, FigureValue::Percent(1.87));

        let statewide = CityRecord::new(STATEWIDE_KEY, 130, 150, 15.38);
        let figure = Figure::from_record(&statewide, Metric::Estimated);
        assert_eq!(figure.scope, Scope::Statewide);
        assert_eq!(figure.value, FigureValue::Population(150));
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::Census.to_string(), "census");
        assert_eq!(Metric::Estimated.to_string(), "estimated");
        assert_eq!(Metric::Growth.to_string(), "growth");
    }
}
