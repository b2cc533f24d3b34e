//! Free-text intent classification.
//!
//! Text is sent to a wit.ai-compatible NLU service which returns named
//! entity lists. The `intent` entity picks the variant; `stop` and
//! `bus_route` entities fill its slots. Slot values are raw strings and
//! are resolved later by the rail or bus directories.

mod client;
mod types;

use serde::Serialize;

pub use client::{WitClient, WitConfig};
pub use types::{Entity, WitResponse};

/// Intent label for rail queries.
const RAIL_QUERY: &str = "bart_query";

/// Intent label for bus queries.
const BUS_QUERY: &str = "bus_query";

/// The classified purpose of a user's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    RailQuery {
        origin: Option<String>,
        destination: Option<String>,
    },
    BusQuery {
        origin: Option<String>,
        destination: Option<String>,
        route: Option<String>,
    },
    /// The message was not understood.
    Help,
}

impl Intent {
    /// Map an NLU response to an intent.
    ///
    /// Slot rules:
    /// - `stop`: two or more entities set origin and destination from the
    ///   first two; exactly one sets origin only.
    /// - `bus_route`: the first entity sets the route, but only when at
    ///   least two were detected. A lone route entity is dropped.
    pub fn from_response(response: &WitResponse) -> Self {
        let label = response
            .entity("intent")
            .first()
            .and_then(Entity::text);

        match label.as_deref() {
            Some(RAIL_QUERY) => {
                let (origin, destination) = stop_slots(response);
                Intent::RailQuery {
                    origin,
                    destination,
                }
            }
            Some(BUS_QUERY) => {
                let (origin, destination) = stop_slots(response);
                Intent::BusQuery {
                    origin,
                    destination,
                    route: route_slot(response),
                }
            }
            _ => Intent::Help,
        }
    }
}

fn stop_slots(response: &WitResponse) -> (Option<String>, Option<String>) {
    match response.entity("stop") {
        [first, second, ..] => (first.text(), second.text()),
        [only] => (only.text(), None),
        [] => (None, None),
    }
}

// TODO: confirm with whoever trains the NLU model whether a single
// bus_route entity should set the route; it is currently discarded.
fn route_slot(response: &WitResponse) -> Option<String> {
    match response.entity("bus_route") {
        [first, _, ..] => first.text(),
        _ => None,
    }
}
