//! Route and stop lookup.

use std::collections::HashMap;

use crate::error::{LookupError, MalformedResponse, TransitError};
use crate::transport::Transport;

use super::client::NextBusClient;

/// Stop tag -> stop title for one route, in route-config order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopMap {
    stops: Vec<(String, String)>,
    /// Tag -> position in `stops`.
    index: HashMap<String, usize>,
}

impl StopMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stop; a repeated tag keeps its position and takes the new title.
    pub fn insert(&mut self, tag: impl Into<String>, title: impl Into<String>) {
        let tag = tag.into();
        let title = title.into();
        match self.index.get(&tag) {
            Some(&i) => self.stops[i].1 = title,
            None => {
                self.index.insert(tag.clone(), self.stops.len());
                self.stops.push((tag, title));
            }
        }
    }

    pub fn title(&self, tag: &str) -> Option<&str> {
        self.index.get(tag).map(|&i| self.stops[i].1.as_str())
    }

    /// Every tag whose title equals `title`.
    pub fn tags_for(&self, title: &str) -> Vec<&str> {
        self.stops
            .iter()
            .filter(|(_, t)| t == title)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Route title -> route tag for one agency.
///
/// Built once per session. Duplicate titles are not detected; the last
/// route listed wins.
#[derive(Debug, Clone, Default)]
pub struct RouteDirectory {
    agency: String,
    routes: HashMap<String, String>,
}

impl RouteDirectory {
    /// Fetch the route list of the client's agency.
    pub async fn build<T: Transport>(client: &NextBusClient<T>) -> Result<Self, TransitError> {
        let agency = client.agency().to_string();
        let routes = build_route_list(client, &agency).await?;
        Ok(Self { agency, routes })
    }

    pub fn from_routes(
        agency: impl Into<String>,
        routes: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            agency: agency.into(),
            routes: routes.into_iter().collect(),
        }
    }

    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Tag for a route title.
    pub fn route_tag(&self, title: &str) -> Result<&str, LookupError> {
        self.routes
            .get(title.trim())
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownRoute(title.to_string()))
    }

    /// All route titles, sorted.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Route title -> tag for `agency`.
///
/// An agency NextBus does not know fails with [`LookupError::UnknownAgency`].
pub async fn build_route_list<T: Transport>(
    client: &NextBusClient<T>,
    agency: &str,
) -> Result<HashMap<String, String>, TransitError> {
    let routes = client
        .fetch_route_list(agency)
        .await
        .map_err(|e| provider_as_lookup(e, || LookupError::UnknownAgency(agency.to_string())))?;

    Ok(routes.into_iter().map(|r| (r.title, r.tag)).collect())
}

/// Stop tag -> title for one route of `agency`.
///
/// A route tag NextBus does not know fails with
/// [`LookupError::UnknownRouteTag`].
pub async fn build_stop_map<T: Transport>(
    client: &NextBusClient<T>,
    agency: &str,
    route_tag: &str,
) -> Result<StopMap, TransitError> {
    client
        .fetch_route_config(agency, route_tag)
        .await
        .map_err(|e| provider_as_lookup(e, || LookupError::UnknownRouteTag(route_tag.to_string())))
}

/// NextBus reports unknown identifiers in-band with `shouldRetry="false"`,
/// or answers with an empty body; turn those into lookups. Retryable
/// errors are provider trouble and pass through unchanged.
fn provider_as_lookup(err: TransitError, lookup: impl FnOnce() -> LookupError) -> TransitError {
    match err {
        TransitError::Malformed(
            MalformedResponse::Provider {
                retryable: false,
                ..
            }
            | MalformedResponse::MissingField("body.route"),
        ) => lookup().into(),
        other => other,
    }
}
