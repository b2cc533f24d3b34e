//! Station name <-> abbreviation lookup.

use std::collections::HashMap;

use crate::error::{LookupError, TransitError};
use crate::transport::Transport;

use super::client::BartClient;
use super::types::StationDto;

/// Canonical key for the station published under two names.
const WARM_SPRINGS: &str = "WARM SPRINGS";

/// Normalize a station display name to its lookup key.
///
/// Keys are trimmed and upper-cased. BART publishes Warm Springs both as
/// "Warm Springs" and "Warm Springs/South Fremont", so any name mentioning
/// "warm" collapses to a single key.
pub fn canonical_station_name(name: &str) -> String {
    let name = name.trim().to_uppercase();
    if name.contains("WARM") {
        WARM_SPRINGS.to_string()
    } else {
        name
    }
}

/// Bidirectional station name / abbreviation mapping.
///
/// Built once from the station list and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    by_name: HashMap<String, String>,
    by_abbr: HashMap<String, String>,
}

impl StationDirectory {
    /// Fetch the station list and build the directory.
    pub async fn build<T: Transport>(client: &BartClient<T>) -> Result<Self, TransitError> {
        let stations = client.fetch_stations().await?;
        Ok(Self::from_stations(stations))
    }

    /// Build the directory from already-fetched station records.
    pub fn from_stations(stations: impl IntoIterator<Item = StationDto>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_abbr = HashMap::new();

        for station in stations {
            let name = canonical_station_name(&station.name);
            let abbr = station.abbr.trim().to_uppercase();
            by_name.insert(name.clone(), abbr.clone());
            by_abbr.insert(abbr, name);
        }

        Self { by_name, by_abbr }
    }

    /// Abbreviation for a display name in any case.
    pub fn abbr_for(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&canonical_station_name(name))
            .map(String::as_str)
    }

    /// Canonical display name for an abbreviation.
    pub fn name_for(&self, abbr: &str) -> Option<&str> {
        self.by_abbr
            .get(&abbr.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Like [`abbr_for`](Self::abbr_for), failing with a lookup error.
    pub fn resolve(&self, name: &str) -> Result<&str, LookupError> {
        self.abbr_for(name)
            .ok_or_else(|| LookupError::UnknownStation(canonical_station_name(name)))
    }

    /// Like [`name_for`](Self::name_for), failing with a lookup error.
    pub fn resolve_abbr(&self, abbr: &str) -> Result<&str, LookupError> {
        self.name_for(abbr)
            .ok_or_else(|| LookupError::UnknownStationAbbr(abbr.to_string()))
    }

    /// All canonical station names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
