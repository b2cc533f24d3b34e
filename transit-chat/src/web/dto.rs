//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::departures::Departures;

/// A chat message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Query for departures from a rail station.
#[derive(Debug, Deserialize)]
pub struct RailDeparturesRequest {
    /// Origin station name
    pub origin: String,

    /// Optional final station of the line to narrow to
    pub line: Option<String>,
}

/// Query for departures on the first leg of a rail trip.
#[derive(Debug, Deserialize)]
pub struct RailPlanRequest {
    pub origin: String,
    pub destination: String,
}

/// Query for departures on a bus route at a stop.
#[derive(Debug, Deserialize)]
pub struct BusDeparturesRequest {
    /// Route title (e.g., "57")
    pub route: String,

    /// Stop title (e.g., "40th St & Telegraph Av")
    pub stop: String,

    /// Optional direction title to narrow to
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub departures: Departures,
}

#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub agency: String,
    pub routes: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
