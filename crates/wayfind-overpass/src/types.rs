//! Overpass API response types (`[out:json]`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level `[out:json]` document.
///
/// `remark` is set when the interpreter hit a runtime limit (timeout, memory)
/// but still answered 200 with whatever it had collected.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<RawElement>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

impl ElementType {
    /// Geometry kinds a place query is issued against.
    pub const QUERYABLE: [ElementType; 3] =
        [ElementType::Node, ElementType::Way, ElementType::Relation];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Way => "way",
            ElementType::Relation => "relation",
            ElementType::Other => "other",
        }
    }
}

/// A single element as returned by the interpreter.
///
/// Nodes carry `lat`/`lon` directly; ways and relations only carry `center`
/// when the query ends in `out center`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

impl RawElement {
    /// Non-blank tag value.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
