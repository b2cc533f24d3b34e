//! Rail departure queries and first-leg trip planning.

use tracing::warn;

use crate::departures::Departures;
use crate::error::TransitError;
use crate::transport::{HttpTransport, Transport};

use super::client::BartClient;
use super::stations::{StationDirectory, canonical_station_name};

/// Rail queries against a session's station directory.
#[derive(Debug, Clone)]
pub struct RailService<T = HttpTransport> {
    client: BartClient<T>,
    stations: StationDirectory,
}

impl<T: Transport> RailService<T> {
    /// Build the station directory and wrap the client.
    pub async fn build(client: BartClient<T>) -> Result<Self, TransitError> {
        let stations = StationDirectory::build(&client).await?;
        Ok(Self::new(client, stations))
    }

    pub fn new(client: BartClient<T>, stations: StationDirectory) -> Self {
        Self { client, stations }
    }

    pub fn stations(&self) -> &StationDirectory {
        &self.stations
    }

    /// Departures from `origin`, optionally narrowed to one line.
    ///
    /// A line is named by its final station. If no train on the board
    /// heads there, the full board is returned rather than an error.
    pub async fn query_rail_departure(
        &self,
        origin: &str,
        line_final_station: Option<&str>,
    ) -> Result<Departures, TransitError> {
        let origin_abbr = self.stations.resolve(origin)?;
        let all = self.client.fetch_rail_estimates(origin_abbr).await?;

        let Some(line) = line_final_station else {
            return Ok(all);
        };

        let line = canonical_station_name(line);
        match all.only(&line) {
            Some(single) => Ok(single),
            None => {
                warn!(origin = %origin_abbr, line = %line, "no such line final station, returning all departures");
                Ok(all)
            }
        }
    }

    /// Departures from `origin` on the line serving the first leg of a trip
    /// to `destination`.
    ///
    /// An unknown destination degrades to the unfiltered origin board. An
    /// unknown first-leg head station is an error.
    pub async fn plan_first_leg(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Departures, TransitError> {
        let origin_abbr = self.stations.resolve(origin)?;

        let Some(destination_abbr) = self.stations.abbr_for(destination) else {
            warn!(
                destination = %canonical_station_name(destination),
                "no such destination station, returning all departures"
            );
            return self.query_rail_departure(origin, None).await;
        };

        let head_abbr = self
            .client
            .fetch_first_leg_head_station(origin_abbr, destination_abbr)
            .await?;
        let line = self.stations.resolve_abbr(&head_abbr)?;

        self.query_rail_departure(origin, Some(line)).await
    }
}
