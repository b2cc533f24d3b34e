//! Bus departure queries.

use tracing::debug;

use crate::departures::Departures;
use crate::error::{LookupError, TransitError};
use crate::transport::{HttpTransport, Transport};

use super::client::NextBusClient;
use super::routes::{RouteDirectory, build_stop_map};

/// Bus queries against a session's route directory.
#[derive(Debug, Clone)]
pub struct BusService<T = HttpTransport> {
    client: NextBusClient<T>,
    routes: RouteDirectory,
}

impl<T: Transport> BusService<T> {
    /// Build the route directory and wrap the client.
    pub async fn build(client: NextBusClient<T>) -> Result<Self, TransitError> {
        let routes = RouteDirectory::build(&client).await?;
        Ok(Self::new(client, routes))
    }

    pub fn new(client: NextBusClient<T>, routes: RouteDirectory) -> Self {
        Self { client, routes }
    }

    pub fn routes(&self) -> &RouteDirectory {
        &self.routes
    }

    /// Departures on `route` from every stop titled `stop`.
    ///
    /// A stop title matching no stop on the route yields an empty result.
    /// When `direction` is given only that direction is returned, and its
    /// absence is an error.
    pub async fn query_bus_departure(
        &self,
        route: &str,
        stop: &str,
        direction: Option<&str>,
    ) -> Result<Departures, TransitError> {
        let agency = self.routes.agency();
        let route_tag = self.routes.route_tag(route)?;

        let stops = build_stop_map(&self.client, agency, route_tag).await?;
        let stop_tags = stops.tags_for(stop.trim());
        debug!(route = %route_tag, stop = %stop, tags = ?stop_tags, "resolved stop tags");

        let all = self
            .client
            .fetch_bus_estimates(agency, route_tag, stop_tags.as_slice())
            .await?;

        match direction {
            None => Ok(all),
            Some(direction) => all
                .only(direction)
                .ok_or_else(|| LookupError::UnknownDirection(direction.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::departures::Eta;
    use crate::fixtures;
    use crate::nextbus::NextBusConfig;
    use crate::transport::MockTransport;

    const TELEGRAPH: &str = "40th St & Telegraph Av";

    fn mock() -> MockTransport {
        MockTransport::new()
            .respond(&[("command", "routeList")], fixtures::NEXTBUS_ROUTES)
            .respond(&[("command", "routeConfig"), ("r", "57")], fixtures::NEXTBUS_ROUTE_57)
            .respond(
                &[("command", "predictions"), ("s", "1002650")],
                fixtures::NEXTBUS_PREDICTIONS_1002650,
            )
            .respond(
                &[("command", "predictions"), ("s", "1002660")],
                fixtures::NEXTBUS_PREDICTIONS_1002660,
            )
    }

    async fn service(mock: &MockTransport) -> BusService<MockTransport> {
        let client = NextBusClient::new(NextBusConfig::default(), mock.clone());
        BusService::build(client).await.unwrap()
    }

    #[tokio::test]
    async fn shared_stop_title_queries_every_tag() {
        let mock = mock();
        let bus = service(&mock).await;

        let departures = bus.query_bus_departure("57", TELEGRAPH, None).await.unwrap();

        assert_eq!(mock.requested("s"), vec!["1002650", "1002660"]);
        assert_eq!(departures.len(), 2);
        // 1002660 is queried last, so its Emeryville estimates win.
        assert_eq!(
            departures.get("To Emeryville").unwrap(),
            &[Eta::Minutes(6), Eta::Minutes(21)]
        );
    }

    #[tokio::test]
    async fn direction_filter() {
        let bus = service(&mock()).await;

        let departures = bus
            .query_bus_departure("57", TELEGRAPH, Some("To Foothill Square"))
            .await
            .unwrap();

        assert_eq!(departures.len(), 1);
        assert_eq!(
            departures.get("To Foothill Square").unwrap(),
            &[Eta::Minutes(4), Eta::Minutes(19)]
        );
    }

    #[tokio::test]
    async fn unknown_direction_is_error() {
        let bus = service(&mock()).await;

        let err = bus
            .query_bus_departure("57", TELEGRAPH, Some("To Richmond"))
            .await
            .unwrap_err();

        assert_eq!(
            err.as_lookup(),
            Some(&LookupError::UnknownDirection("To Richmond".into()))
        );
    }

    #[tokio::test]
    async fn unmatched_stop_is_empty() {
        let mock = mock();
        let bus = service(&mock).await;

        let departures = bus
            .query_bus_departure("57", "Nowhere & Nothing", None)
            .await
            .unwrap();

        assert!(departures.is_empty());
        assert!(mock.requested("s").is_empty());
    }

    #[tokio::test]
    async fn unknown_route_is_error() {
        let mock = mock();
        let bus = service(&mock).await;

        let err = bus.query_bus_departure("99X", TELEGRAPH, None).await.unwrap_err();

        assert_eq!(
            err.as_lookup(),
            Some(&LookupError::UnknownRoute("99X".into()))
        );
        assert_eq!(mock.requested("command"), vec!["routeList"]);
    }
}
