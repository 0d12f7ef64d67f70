//! Statewide aggregation.
//!
//! This module sums the population figures of every city in the registry
//! and derives the statewide growth rate from those sums.

use crate::models::{percent_change, CityRecord, STATEWIDE_KEY};
use crate::registry::Registry;
use thiserror::Error;

/// Why a statewide aggregate could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("no city records loaded; statewide figures unavailable")]
    NoRecords,

    #[error("total 2020 census population is zero; statewide growth undefined")]
    ZeroPopulation,
}

/// Compute the statewide aggregate over all real city records.
///
/// The growth rate is derived from the summed populations, not averaged
/// from the per-city rates.
pub fn aggregate(registry: &Registry) -> Result<CityRecord, AggregateError> {
    if registry.is_empty() {
        return Err(AggregateError::NoRecords);
    }

    let (census2020, estimated2023) = registry
        .cities()
        .fold((0u64, 0u64), |(census, estimated), city| {
            (
                census.saturating_add(city.census2020),
                estimated.saturating_add(city.estimated2023),
            )
        });

    let growth_rate =
        percent_change(census2020, estimated2023).ok_or(AggregateError::ZeroPopulation)?;

    Ok(CityRecord::new(
        STATEWIDE_KEY,
        census2020,
        estimated2023,
        growth_rate,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_of(rows: &[(&str, u64, u64, f64)]) -> Registry {
        let mut registry = Registry::new();
        for (name, census, estimated, growth) in rows {
            registry
                .insert(CityRecord::new(*name, *census, *estimated, *growth))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_aggregate_two_cities() {
        let registry = registry_of(&[("Acity", 90, 100, 10.0), ("Bcity", 40, 50, 20.0)]);

        let texas = aggregate(&registry).unwrap();
        assert_eq!(texas.name, STATEWIDE_KEY);
        assert_eq!(texas.census2020, 130);
        assert_eq!(texas.estimated2023, 150);
        assert!((texas.growth_rate - 15.384_615).abs() < 1e-4);
    }

    #[test]
    fn test_aggregate_sums_many_records() {
        let rows: Vec<(String, u64, u64)> = (1..=25)
            .map(|i| (format!("City{}", i), i * 1_000, i * 1_000 + i * 37))
            .collect();

        let mut registry = Registry::new();
        for (name, census, estimated) in &rows {
            registry
                .insert(CityRecord::new(name.as_str(), *census, *estimated, 0.0))
                .unwrap();
        }

        let census_sum: u64 = rows.iter().map(|r| r.1).sum();
        let estimated_sum: u64 = rows.iter().map(|r| r.2).sum();

        let texas = aggregate(&registry).unwrap();
        assert_eq!(texas.census2020, census_sum);
        assert_eq!(texas.estimated2023, estimated_sum);

        let expected =
            (estimated_sum as f64 - census_sum as f64) / census_sum as f64 * 100.0;
        assert!((texas.growth_rate - expected).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_ignores_stored_rates() {
        // Stored rates are nonsense; only populations matter.
        let registry = registry_of(&[("Acity", 100, 100, 999.0)]);
        let texas = aggregate(&registry).unwrap();
        assert_eq!(texas.growth_rate, 0.0);
    }

    #[test]
    fn test_aggregate_empty_registry() {
        assert_eq!(aggregate(&Registry::new()), Err(AggregateError::NoRecords));
    }
}
