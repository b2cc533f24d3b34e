//! Query error types.
//!
//! Every query returns [`TransitError`], which is one of three kinds:
//! the provider could not be reached ([`TransportError`]), a name or
//! identifier did not resolve ([`LookupError`]), or the provider's payload
//! lacked something we expected ([`MalformedResponse`]).

use crate::transport::TransportError;

/// A name or identifier that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no such station: {0}")]
    UnknownStation(String),

    #[error("no such station abbreviation: {0}")]
    UnknownStationAbbr(String),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("unknown agency: {0}")]
    UnknownAgency(String),

    #[error("unknown route tag: {0}")]
    UnknownRouteTag(String),

    #[error("no departures in direction: {0}")]
    UnknownDirection(String),
}

/// A provider payload that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("JSON parse error: {message}")]
    Json { message: String },

    #[error("XML parse error: {message}")]
    Xml { message: String },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid minutes value: {0:?}")]
    InvalidMinutes(String),

    /// In-band `<Error>` from NextBus. `retryable` mirrors its
    /// `shouldRetry` attribute.
    #[error("provider error: {message}")]
    Provider { message: String, retryable: bool },
}

/// Any failure of a transit query.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl TransitError {
    /// The lookup failure, if this is one.
    pub fn as_lookup(&self) -> Option<&LookupError> {
        match self {
            TransitError::Lookup(e) => Some(e),
            _ => None,
        }
    }
}
