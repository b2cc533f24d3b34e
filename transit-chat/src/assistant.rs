//! Chat replies: classify a message, run the matching query, render it.

use serde::Serialize;
use tracing::info;

use crate::bart::RailService;
use crate::departures::Departures;
use crate::error::TransitError;
use crate::intent::{Intent, WitClient};
use crate::nextbus::BusService;
use crate::transport::{HttpTransport, Transport};

/// Reply when the message was not understood or lacks a required slot.
pub const HELP_TEXT: &str = "Sorry, I didn't catch that. Try \"BART from Downtown Berkeley to \
Fremont\" or \"when is the 57 at 40th St & Telegraph Av\".";

/// A chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    /// Present when a query ran.
    pub departures: Option<Departures>,
}

impl Reply {
    fn help(intent: Intent) -> Self {
        Self {
            intent,
            text: HELP_TEXT.to_string(),
            departures: None,
        }
    }

    fn departures(intent: Intent, heading: String, departures: Departures) -> Self {
        Self {
            intent,
            text: format!("{heading}\n{departures}"),
            departures: Some(departures),
        }
    }
}

/// Routes classified messages to the rail and bus queries.
pub struct Assistant<T = HttpTransport> {
    classifier: WitClient<T>,
    rail: RailService<T>,
    bus: BusService<T>,
}

impl<T: Transport> Assistant<T> {
    pub fn new(classifier: WitClient<T>, rail: RailService<T>, bus: BusService<T>) -> Self {
        Self {
            classifier,
            rail,
            bus,
        }
    }

    pub fn rail(&self) -> &RailService<T> {
        &self.rail
    }

    pub fn bus(&self) -> &BusService<T> {
        &self.bus
    }

    /// Classify `text` and answer it.
    pub async fn respond(&self, text: &str) -> Result<Reply, TransitError> {
        let intent = self.classifier.classify(text).await?;
        info!(?intent, "classified message");
        self.handle(intent).await
    }

    /// Answer an already-classified intent.
    ///
    /// Rail queries need an origin and plan the first leg when a
    /// destination is known. Bus queries need an origin stop and a route;
    /// the destination slot is not used.
    pub async fn handle(&self, intent: Intent) -> Result<Reply, TransitError> {
        match &intent {
            Intent::RailQuery {
                origin: Some(origin),
                destination: Some(destination),
            } => {
                let departures = self.rail.plan_first_leg(origin, destination).await?;
                let heading = format!("BART from {origin} toward {destination}:");
                Ok(Reply::departures(intent.clone(), heading, departures))
            }
            Intent::RailQuery {
                origin: Some(origin),
                destination: None,
            } => {
                let departures = self.rail.query_rail_departure(origin, None).await?;
                let heading = format!("BART from {origin}:");
                Ok(Reply::departures(intent.clone(), heading, departures))
            }
            Intent::BusQuery {
                origin: Some(stop),
                route: Some(route),
                ..
            } => {
                let departures = self.bus.query_bus_departure(route, stop, None).await?;
                let heading = format!("Route {route} at {stop}:");
                Ok(Reply::departures(intent.clone(), heading, departures))
            }
            _ => Ok(Reply::help(intent.clone())),
        }
    }
}
