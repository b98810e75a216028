//! Conversion of raw Overpass elements into ranked, display-ready places.

use std::cmp::Ordering;

use serde::Serialize;
use wayfind_core::{haversine_km, Coordinate};

use crate::types::{ElementType, RawElement};

pub const ADDRESS_UNAVAILABLE: &str = "Address not available";
pub const UNKNOWN_KIND: &str = "unknown";

/// Tag keys consulted, in order, for the display type of a place.
const KIND_KEYS: [&str; 5] = ["amenity", "shop", "tourism", "leisure", "highway"];

/// Tag keys consulted, in order, for the display name. An element with
/// neither is dropped, so no placeholder name is ever needed.
const NAME_KEYS: [&str; 2] = ["name", "brand"];

/// Structured address parts joined when `addr:full` is absent.
const ADDRESS_PARTS: [&str; 3] = ["addr:housenumber", "addr:street", "addr:city"];

/// A normalized place ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: i64,
    pub element_type: ElementType,
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    /// Kilometres from the search origin, rounded to one decimal.
    pub distance_km: Option<f64>,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Round a distance to one decimal place.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// First non-blank value among `keys`, in order.
fn first_tag<'a>(element: &'a RawElement, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| element.tag(k))
}

fn display_kind(element: &RawElement) -> String {
    first_tag(element, &KIND_KEYS)
        .unwrap_or(UNKNOWN_KIND)
        .to_string()
}

fn build_address(element: &RawElement) -> String {
    if let Some(full) = element.tag("addr:full") {
        return full.to_string();
    }
    let parts: Vec<&str> = ADDRESS_PARTS.iter().filter_map(|k| element.tag(k)).collect();
    if parts.is_empty() {
        ADDRESS_UNAVAILABLE.to_string()
    } else {
        parts.join(" ")
    }
}

/// Direct `lat`/`lon` when both are present, else `center`.
///
/// Out-of-range values count as unresolvable.
fn resolve_coordinate(element: &RawElement) -> Option<Coordinate> {
    let (lat, lon) = match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return None,
    };
    Coordinate::new(lat, lon).ok()
}

/// Convert one element, or `None` if it has neither `name` nor `brand` or
/// no resolvable coordinate.
#[must_use]
pub fn normalize_element(element: &RawElement, origin: Coordinate) -> Option<Place> {
    let name = first_tag(element, &NAME_KEYS)?;
    let coordinate = resolve_coordinate(element)?;
    let owned = |key: &str| element.tag(key).map(str::to_owned);

    Some(Place {
        id: element.id,
        element_type: element.element_type,
        name: name.to_string(),
        address: build_address(element),
        coordinate,
        distance_km: Some(round_km(haversine_km(origin, coordinate))),
        kind: display_kind(element),
        cuisine: owned("cuisine"),
        phone: owned("phone"),
        website: owned("website"),
        opening_hours: owned("opening_hours"),
        brand: owned("brand"),
        operator: owned("operator"),
        description: owned("description"),
    })
}

/// Sort ascending by distance and keep the first `limit`.
///
/// Places without a distance sort after every place with one, however far.
/// The sort is stable, so equal distances keep upstream order.
#[must_use]
pub fn rank_places(mut places: Vec<Place>, limit: usize) -> Vec<Place> {
    places.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    places.truncate(limit);
    places
}

/// Normalize every element against `origin`, then rank and cap the result.
#[must_use]
pub fn normalize_and_rank(elements: &[RawElement], origin: Coordinate, limit: usize) -> Vec<Place> {
    let places: Vec<Place> = elements
        .iter()
        .filter_map(|el| normalize_element(el, origin))
        .collect();
    let dropped = elements.len() - places.len();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = places.len(),
            "discarded elements without a name or coordinate"
        );
    }
    rank_places(places, limit)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
