//! In-memory registry of city records.
//!
//! The registry owns every [`CityRecord`] loaded from the dataset plus the
//! synthetic statewide aggregate stored under [`STATEWIDE_KEY`].

pub mod loader;

pub use loader::{load, parse_dataset, LoadOutcome, LoaderOptions};

use crate::analysis::{aggregate, AggregateError};
use crate::models::{CityRecord, STATEWIDE_KEY};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Reasons a record is refused by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate city `{0}`")]
    Duplicate(String),

    #[error("`{0}` is reserved for the statewide aggregate")]
    ReservedName(String),

    #[error("`{0}` has a zero 2020 census population")]
    ZeroCensus(String),
}

/// Title-case a name for case-insensitive lookup.
///
/// A letter is upper-cased when it starts the string or follows a
/// non-letter, and lower-cased otherwise.
pub fn canonical_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut after_letter = false;

    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if after_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(ch);
            after_letter = false;
        }
    }

    out
}

/// City records keyed by canonical name, in load order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    cities: IndexMap<String, CityRecord>,
    statewide: Option<CityRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a city record.
    ///
    /// The record's name is canonicalised first.
    pub fn insert(&mut self, mut record: CityRecord) -> Result<(), RegistryError> {
        record.name = canonical_name(&record.name);

        if record.name == STATEWIDE_KEY {
            return Err(RegistryError::ReservedName(record.name));
        }
        if record.census2020 == 0 {
            return Err(RegistryError::ZeroCensus(record.name));
        }
        if self.cities.contains_key(&record.name) {
            return Err(RegistryError::Duplicate(record.name));
        }

        self.cities.insert(record.name.clone(), record);
        Ok(())
    }

    /// Look up a city or the statewide aggregate by any casing of its name.
    pub fn get(&self, name: &str) -> Option<&CityRecord> {
        let canonical = canonical_name(name);
        if canonical == STATEWIDE_KEY {
            self.statewide.as_ref()
        } else {
            self.cities.get(&canonical)
        }
    }

    /// Iterate real city records in load order.
    pub fn cities(&self) -> impl Iterator<Item = &CityRecord> {
        self.cities.values()
    }

    /// City names in load order.
    pub fn names(&self) -> Vec<String> {
        self.cities.keys().cloned().collect()
    }

    /// Number of real city records.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Recompute the statewide aggregate from the current city records.
    ///
    /// On failure the previous aggregate is cleared.
    pub fn refresh_statewide(&mut self) -> Result<&CityRecord, AggregateError> {
        match aggregate(self) {
            Ok(record) => {
                debug!(
                    census2020 = record.census2020,
                    estimated2023 = record.estimated2023,
                    "Refreshed statewide aggregate"
                );
                Ok(&*self.statewide.insert(record))
            }
            Err(e) => {
                self.statewide = None;
                Err(e)
            }
        }
    }
}
