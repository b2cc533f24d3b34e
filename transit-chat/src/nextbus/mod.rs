//! NextBus (bus) client, route directory and departure queries.
//!
//! NextBus serves XML. Routes are addressed by tag and carry a display
//! title; stops likewise. One display title can belong to several stop
//! tags on the same route (typically one per direction of travel), so stop
//! resolution yields a set of tags, all of which are queried.

mod client;
mod departures;
mod parse;
mod routes;

pub use client::{NextBusClient, NextBusConfig};
pub use departures::BusService;
pub use parse::{Agency, RouteDto};
pub use routes::{RouteDirectory, StopMap};
