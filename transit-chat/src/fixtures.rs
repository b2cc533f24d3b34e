//! Canned provider payloads for tests.

pub const BART_STATIONS: &str = include_str!("../data/fixtures/bart_stations.json");
pub const BART_ETD_FRMT: &str = include_str!("../data/fixtures/bart_etd_frmt.json");
pub const BART_ETD_DBRK: &str = include_str!("../data/fixtures/bart_etd_dbrk.json");
pub const BART_ETD_NO_SERVICE: &str = include_str!("../data/fixtures/bart_etd_no_service.json");
pub const BART_TRIP_DBRK_FRMT: &str = include_str!("../data/fixtures/bart_trip_dbrk_frmt.json");

pub const NEXTBUS_AGENCIES: &str = include_str!("../data/fixtures/nextbus_agencies.xml");
pub const NEXTBUS_ROUTES: &str = include_str!("../data/fixtures/nextbus_routes.xml");
pub const NEXTBUS_ROUTE_57: &str = include_str!("../data/fixtures/nextbus_route_57.xml");
pub const NEXTBUS_PREDICTIONS_1002650: &str =
    include_str!("../data/fixtures/nextbus_predictions_1002650.xml");
pub const NEXTBUS_PREDICTIONS_1002660: &str =
    include_str!("../data/fixtures/nextbus_predictions_1002660.xml");
pub const NEXTBUS_ERROR: &str = include_str!("../data/fixtures/nextbus_error.xml");

pub const WIT_BUS_QUERY: &str = include_str!("../data/fixtures/wit_bus_query.json");
pub const WIT_BART_QUERY: &str = include_str!("../data/fixtures/wit_bart_query.json");
pub const WIT_NO_INTENT: &str = include_str!("../data/fixtures/wit_no_intent.json");
