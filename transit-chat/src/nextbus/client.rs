//! NextBus public XML feed client.

use futures::future::try_join_all;

use crate::departures::Departures;
use crate::error::TransitError;
use crate::transport::{HttpTransport, Request, Transport};

use super::parse::{Agency, RouteDto, parse_agencies, parse_predictions, parse_route_config, parse_routes};
use super::routes::StopMap;

/// Default base URL for the NextBus public XML feed.
const DEFAULT_BASE_URL: &str = "https://webservices.nextbus.com/service/publicXMLFeed";

/// Default agency (AC Transit).
const DEFAULT_AGENCY: &str = "actransit";

/// Configuration for the NextBus client.
#[derive(Debug, Clone)]
pub struct NextBusConfig {
    /// Agency tag used by session-level lookups
    pub agency: String,
    /// Base URL for the feed
    pub base_url: String,
}

impl NextBusConfig {
    pub fn new(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for NextBusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AGENCY)
    }
}

/// NextBus feed client.
#[derive(Debug, Clone)]
pub struct NextBusClient<T = HttpTransport> {
    transport: T,
    agency: String,
    base_url: String,
}

impl<T: Transport> NextBusClient<T> {
    pub fn new(config: NextBusConfig, transport: T) -> Self {
        Self {
            transport,
            agency: config.agency,
            base_url: config.base_url,
        }
    }

    /// The configured agency tag.
    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// All agencies served by the feed.
    pub async fn fetch_agency_list(&self) -> Result<Vec<Agency>, TransitError> {
        let body = self.command("agencyList", &[]).await?;
        Ok(parse_agencies(&body)?)
    }

    pub async fn fetch_route_list(&self, agency: &str) -> Result<Vec<RouteDto>, TransitError> {
        let body = self.command("routeList", &[("a", agency)]).await?;
        Ok(parse_routes(&body)?)
    }

    pub async fn fetch_route_config(&self, agency: &str, route_tag: &str) -> Result<StopMap, TransitError> {
        let body = self
            .command("routeConfig", &[("a", agency), ("r", route_tag)])
            .await?;
        Ok(parse_route_config(&body)?)
    }

    /// Predictions for a single stop, keyed by direction title.
    pub async fn fetch_predictions(
        &self,
        agency: &str,
        route_tag: &str,
        stop_tag: &str,
    ) -> Result<Departures, TransitError> {
        let body = self
            .command("predictions", &[("a", agency), ("r", route_tag), ("s", stop_tag)])
            .await?;
        Ok(parse_predictions(&body)?)
    }

    /// Predictions for several stops of one route, merged by direction title.
    ///
    /// Stops are fetched concurrently but merged in the order given, so a
    /// later stop's direction replaces an earlier one with the same title.
    pub async fn fetch_bus_estimates<S: AsRef<str>>(
        &self,
        agency: &str,
        route_tag: &str,
        stop_tags: &[S],
    ) -> Result<Departures, TransitError> {
        let fetches: Vec<_> = stop_tags
            .iter()
            .map(|stop| self.fetch_predictions(agency, route_tag, stop.as_ref()))
            .collect();
        let per_stop = try_join_all(fetches).await?;

        let mut merged = Departures::new();
        for departures in per_stop {
            merged.merge(departures);
        }
        Ok(merged)
    }

    async fn command(&self, command: &str, params: &[(&str, &str)]) -> Result<String, TransitError> {
        let mut query = vec![("command", command)];
        query.extend_from_slice(params);

        let request = Request::get(&self.base_url, &query)?;
        Ok(self.transport.get(request).await?)
    }
}
