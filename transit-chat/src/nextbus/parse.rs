//! NextBus XML feed parsing.
//!
//! Every command answers with a `<body>` document. Failures are reported
//! in-band as `<body><Error>message</Error></body>` with a success status,
//! which surfaces here as [`MalformedResponse::Provider`].

use roxmltree::{Document, Node};

use crate::departures::{Departures, Eta};
use crate::error::MalformedResponse;

use super::routes::StopMap;

/// A transit agency from the `agencyList` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    pub tag: String,
    pub title: String,
    pub region_title: Option<String>,
}

/// A route from the `routeList` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDto {
    pub tag: String,
    pub title: String,
}

fn parse_document(xml: &str) -> Result<Document<'_>, MalformedResponse> {
    let doc = Document::parse(xml).map_err(|e| MalformedResponse::Xml {
        message: e.to_string(),
    })?;

    if let Some(error) = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("Error"))
    {
        let message = error.text().unwrap_or_default().trim().to_string();
        let retryable = error.attribute("shouldRetry") == Some("true");
        return Err(MalformedResponse::Provider { message, retryable });
    }

    Ok(doc)
}

fn required<'a>(node: Node<'a, '_>, name: &'static str, field: &'static str) -> Result<&'a str, MalformedResponse> {
    node.attribute(name).ok_or(MalformedResponse::MissingField(field))
}

fn elements<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(tag))
}

pub fn parse_agencies(xml: &str) -> Result<Vec<Agency>, MalformedResponse> {
    let doc = parse_document(xml)?;
    elements(doc.root_element(), "agency")
        .map(|n| {
            Ok(Agency {
                tag: required(n, "tag", "agency.tag")?.to_string(),
                title: required(n, "title", "agency.title")?.to_string(),
                region_title: n.attribute("regionTitle").map(str::to_string),
            })
        })
        .collect()
}

pub fn parse_routes(xml: &str) -> Result<Vec<RouteDto>, MalformedResponse> {
    let doc = parse_document(xml)?;
    elements(doc.root_element(), "route")
        .map(|n| {
            Ok(RouteDto {
                tag: required(n, "tag", "route.tag")?.to_string(),
                title: required(n, "title", "route.title")?.to_string(),
            })
        })
        .collect()
}

/// Stop tag -> title for one route's configuration.
///
/// Titled stops are listed directly under `<route>`; `<direction>` elements
/// repeat them by tag only. Titled stops under a direction are accepted
/// too.
pub fn parse_route_config(xml: &str) -> Result<StopMap, MalformedResponse> {
    let doc = parse_document(xml)?;
    let route = elements(doc.root_element(), "route")
        .next()
        .ok_or(MalformedResponse::MissingField("body.route"))?;

    let mut stops = StopMap::new();
    for stop in route.descendants().filter(|n| n.has_tag_name("stop")) {
        let tag = required(stop, "tag", "stop.tag")?;
        if let Some(title) = stop.attribute("title") {
            stops.insert(tag, title);
        }
    }

    Ok(stops)
}

/// Direction title -> estimates for one stop.
pub fn parse_predictions(xml: &str) -> Result<Departures, MalformedResponse> {
    let doc = parse_document(xml)?;

    let mut departures = Departures::new();
    for predictions in elements(doc.root_element(), "predictions") {
        for direction in elements(predictions, "direction") {
            let title = required(direction, "title", "direction.title")?;
            let etas = elements(direction, "prediction")
                .map(|p| Eta::parse(required(p, "minutes", "prediction.minutes")?))
                .collect::<Result<Vec<_>, _>>()?;
            departures.insert(title, etas);
        }
    }

    Ok(departures)
}
