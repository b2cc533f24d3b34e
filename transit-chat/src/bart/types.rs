//! BART API response DTOs.
//!
//! BART's JSON is a mechanical conversion of its XML feed: attributes
//! become `@`-prefixed keys and empty lists are omitted entirely, so every
//! list is defaulted and everything below `root` is optional.

use serde::{Deserialize, Serialize};

use crate::error::MalformedResponse;

/// Response from `stn.aspx?cmd=stns`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    pub root: StationsRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsRoot {
    pub stations: Option<StationList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationList {
    pub station: Option<Vec<StationDto>>,
}

/// Minimal DTO for station data - we only need name and abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StationDto {
    pub name: String,
    pub abbr: String,
}

impl StationsResponse {
    /// The station list, which must be present even if empty.
    pub fn into_stations(self) -> Result<Vec<StationDto>, MalformedResponse> {
        self.root
            .stations
            .and_then(|s| s.station)
            .ok_or(MalformedResponse::MissingField("root.stations.station"))
    }
}

/// Response from `etd.aspx?cmd=etd`.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdResponse {
    pub root: EtdRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    #[serde(default)]
    pub station: Vec<EtdStation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdStation {
    pub name: Option<String>,
    pub abbr: Option<String>,
    /// Absent when no trains are scheduled (e.g. overnight).
    #[serde(default)]
    pub etd: Vec<Etd>,
}

/// Departures from one station towards one destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Etd {
    pub destination: String,
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub estimate: Vec<Estimate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Estimate {
    /// Whole minutes, or `"Leaving"`.
    pub minutes: String,
    pub platform: Option<String>,
    pub direction: Option<String>,
    pub color: Option<String>,
}

/// Response from `sched.aspx?cmd=arrive`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripResponse {
    pub root: TripRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripRoot {
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    pub request: Option<ScheduleRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub trip: Vec<Trip>,
}

/// One itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub leg: Vec<Leg>,
}

/// One directly-connected segment of an itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    #[serde(rename = "@origin")]
    pub origin: Option<String>,
    #[serde(rename = "@destination")]
    pub destination: Option<String>,
    #[serde(rename = "@line")]
    pub line: Option<String>,
    /// Abbreviation of the station the train on this leg terminates at.
    #[serde(rename = "@trainHeadStation")]
    pub train_head_station: Option<String>,
}

impl TripResponse {
    /// Head station of the first leg of the first itinerary.
    pub fn first_leg_head_station(&self) -> Result<&str, MalformedResponse> {
        let request = self
            .root
            .schedule
            .as_ref()
            .and_then(|s| s.request.as_ref())
            .ok_or(MalformedResponse::MissingField("root.schedule.request"))?;

        let trip = request
            .trip
            .first()
            .ok_or(MalformedResponse::MissingField("root.schedule.request.trip"))?;

        let leg = trip
            .leg
            .first()
            .ok_or(MalformedResponse::MissingField("trip.leg"))?;

        leg.train_head_station
            .as_deref()
            .ok_or(MalformedResponse::MissingField("leg.@trainHeadStation"))
    }
}
