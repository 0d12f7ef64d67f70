//! Growth-rate deviation report.
//!
//! Ranks every city by how far its growth rate sits from the mean rate.
//! The standard deviation is the population standard deviation (divide
//! by N). Cities with equal deviation keep their registry load order.

use crate::registry::Registry;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviationError {
    #[error("no city records loaded; growth data unavailable")]
    NoRecords,
}

/// One ranked city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationRow {
    pub name: String,
    pub census2020: u64,
    pub estimated2023: u64,
    pub growth_rate: f64,
    /// Growth rate minus the mean growth rate.
    pub deviation: f64,
}

/// Cities ranked by ascending deviation, with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationReport {
    pub rows: Vec<DeviationRow>,
    pub mean: f64,
    pub standard_deviation: f64,
    pub city_count: usize,
}

/// A histogram bucket over growth rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// Set on the last bin, which also holds `upper` itself.
    pub closed: bool,
}

impl HistogramBin {
    /// Whether `value` falls in this bin.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && (value < self.upper || (self.closed && value <= self.upper))
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Rank the registry's cities by deviation from the mean growth rate.
pub fn rank(registry: &Registry) -> Result<DeviationReport, DeviationError> {
    let rates: Vec<f64> = registry.cities().map(|c| c.growth_rate).collect();
    let mean = mean(&rates).ok_or(DeviationError::NoRecords)?;
    let standard_deviation = population_std_dev(&rates).ok_or(DeviationError::NoRecords)?;

    let mut rows: Vec<DeviationRow> = registry
        .cities()
        .map(|city| DeviationRow {
            name: city.name.clone(),
            census2020: city.census2020,
            estimated2023: city.estimated2023,
            growth_rate: city.growth_rate,
            deviation: city.growth_rate - mean,
        })
        .collect();

    // Stable: ties stay in load order.
    rows.sort_by(|a, b| a.deviation.total_cmp(&b.deviation));

    Ok(DeviationReport {
        city_count: rows.len(),
        rows,
        mean,
        standard_deviation,
    })
}

impl DeviationReport {
    /// Smallest and largest growth rate in the report.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.rows.iter().map(|r| r.growth_rate).fold(None, |acc, rate| {
            Some(match acc {
                None => (rate, rate),
                Some((lo, hi)) => (lo.min(rate), hi.max(rate)),
            })
        })
    }

    /// Count growth rates into equal-width bins spanning the observed range.
    ///
    /// Collapses to a single bin when every rate is identical.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let Some((lo, hi)) = self.range() else {
            return Vec::new();
        };

        let bins = if hi > lo { bins.max(1) } else { 1 };
        let width = (hi - lo) / bins as f64;

        let mut buckets: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count: 0,
                closed: i + 1 == bins,
            })
            .collect();

        for row in &self.rows {
            let index = if width > 0.0 {
                (((row.growth_rate - lo) / width) as usize).min(bins - 1)
            } else {
                0
            };
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.count += 1;
            }
        }

        buckets
    }
}
