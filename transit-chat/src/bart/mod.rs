//! BART (rail) client, station directory and departure queries.
//!
//! BART identifies stations by a four-letter abbreviation (`FRMT`,
//! `DBRK`); users type display names. The [`StationDirectory`] maps
//! between the two and is built once per session. [`RailService`] composes
//! the directory with the client to answer departure and first-leg queries.

mod client;
mod convert;
mod departures;
mod stations;
mod types;

pub use client::{BartClient, BartConfig};
pub use convert::convert_etd;
pub use departures::RailService;
pub use stations::{StationDirectory, canonical_station_name};
pub use types::{EtdResponse, StationDto, StationsResponse, TripResponse};
