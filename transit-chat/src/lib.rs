//! Transit chat server.
//!
//! A web application that answers questions like "when is the next BART
//! from Downtown Berkeley to Fremont?" or "when is the 57 at 40th St &
//! Telegraph Av?" using live BART and NextBus departure estimates.

pub mod assistant;
pub mod bart;
pub mod config;
pub mod departures;
pub mod error;
pub mod intent;
pub mod nextbus;
pub mod transport;
pub mod web;

#[cfg(test)]
mod fixtures;
