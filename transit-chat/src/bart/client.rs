//! BART API client.

use serde::de::DeserializeOwned;

use crate::departures::Departures;
use crate::error::{MalformedResponse, TransitError};
use crate::transport::{HttpTransport, Request, Transport};

use super::convert::convert_etd;
use super::types::{EtdResponse, StationDto, StationsResponse, TripResponse};

/// Default base URL for the BART API.
const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// Configuration for the BART client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production BART)
    pub base_url: String,
}

impl BartConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// BART API client.
///
/// Each method performs exactly one request. Nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct BartClient<T = HttpTransport> {
    transport: T,
    api_key: String,
    base_url: String,
}

impl<T: Transport> BartClient<T> {
    pub fn new(config: BartConfig, transport: T) -> Self {
        Self {
            transport,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the full station list.
    pub async fn fetch_stations(&self) -> Result<Vec<StationDto>, TransitError> {
        let response: StationsResponse = self.get_json("stn.aspx", &[("cmd", "stns")]).await?;
        Ok(response.into_stations()?)
    }

    /// Fetch estimated departures from a station, keyed by destination.
    pub async fn fetch_rail_estimates(&self, origin_abbr: &str) -> Result<Departures, TransitError> {
        let response: EtdResponse = self
            .get_json("etd.aspx", &[("cmd", "etd"), ("orig", origin_abbr)])
            .await?;
        Ok(convert_etd(&response)?)
    }

    /// Fetch the trip plan between two stations and return the head station
    /// abbreviation of its first leg.
    pub async fn fetch_first_leg_head_station(
        &self,
        origin_abbr: &str,
        destination_abbr: &str,
    ) -> Result<String, TransitError> {
        let response: TripResponse = self
            .get_json(
                "sched.aspx",
                &[
                    ("cmd", "arrive"),
                    ("orig", origin_abbr),
                    ("dest", destination_abbr),
                ],
            )
            .await?;
        Ok(response.first_leg_head_station()?.to_string())
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        page: &str,
        params: &[(&str, &str)],
    ) -> Result<R, TransitError> {
        let mut params = params.to_vec();
        params.push(("key", self.api_key.as_str()));
        params.push(("json", "y"));

        let url = format!("{}/{}", self.base_url, page);
        let request = Request::get(&url, &params)?;
        let body = self.transport.get(request).await?;

        serde_json::from_str(&body).map_err(|e| {
            MalformedResponse::Json {
                message: e.to_string(),
            }
            .into()
        })
    }
}
