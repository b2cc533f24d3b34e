//! Conversion from BART DTOs to [`Departures`].

use crate::departures::{Departures, Eta};
use crate::error::MalformedResponse;

use super::stations::canonical_station_name;
use super::types::EtdResponse;

/// Flatten an ETD response into destination -> estimates.
///
/// Destinations are keyed by canonical station name so they can be matched
/// against directory names. Estimate order is kept as sent.
pub fn convert_etd(response: &EtdResponse) -> Result<Departures, MalformedResponse> {
    let station = response
        .root
        .station
        .first()
        .ok_or(MalformedResponse::MissingField("root.station"))?;

    let mut departures = Departures::new();
    for etd in &station.etd {
        let etas = etd
            .estimate
            .iter()
            .map(|e| Eta::parse(&e.minutes))
            .collect::<Result<Vec<_>, _>>()?;
        departures.insert(canonical_station_name(&etd.destination), etas);
    }

    Ok(departures)
}
