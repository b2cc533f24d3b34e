//! Uniform departure-time structure shared by both providers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::MalformedResponse;

/// One predicted departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eta {
    /// The vehicle is departing now.
    Leaving,
    /// Whole minutes until departure.
    Minutes(u32),
}

impl Eta {
    /// Parse a provider minutes value.
    ///
    /// Both providers send minutes as strings; BART sends `"Leaving"` for a
    /// train at the platform.
    pub fn parse(s: &str) -> Result<Self, MalformedResponse> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("leaving") {
            return Ok(Eta::Leaving);
        }
        s.parse()
            .map(Eta::Minutes)
            .map_err(|_| MalformedResponse::InvalidMinutes(s.to_string()))
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Leaving => f.write_str("leaving"),
            Eta::Minutes(m) => write!(f, "{m}"),
        }
    }
}

impl Serialize for Eta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Eta::Leaving => serializer.serialize_str("Leaving"),
            Eta::Minutes(m) => serializer.serialize_u32(*m),
        }
    }
}

/// Destination or direction label -> estimates in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Departures(BTreeMap<String, Vec<Eta>>);

impl Departures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert estimates for a label, replacing any previous entry.
    pub fn insert(&mut self, label: impl Into<String>, etas: Vec<Eta>) {
        self.0.insert(label.into(), etas);
    }

    pub fn get(&self, label: &str) -> Option<&[Eta]> {
        self.0.get(label).map(Vec::as_slice)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Eta])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Merge `other` into `self`; entries of `other` win on collision.
    pub fn merge(&mut self, other: Departures) {
        self.0.extend(other.0);
    }

    /// The singleton mapping for `label`, if present.
    pub fn only(&self, label: &str) -> Option<Departures> {
        self.0.get_key_value(label).map(|(k, v)| {
            let mut single = Departures::new();
            single.insert(k.clone(), v.clone());
            single
        })
    }
}

impl FromIterator<(String, Vec<Eta>)> for Departures {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Eta>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Chat rendering: one label per line.
impl fmt::Display for Departures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No departures found.");
        }
        for (i, (label, etas)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let times: Vec<String> = etas.iter().map(Eta::to_string).collect();
            write!(f, "{label}: {} min", times.join(", "))?;
        }
        Ok(())
    }
}
