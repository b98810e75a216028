//! Overpass QL construction for "places of a category near a point".
//!
//! Every tag predicate of a category is expanded into one clause per geometry
//! kind (`node`, `way`, `relation`) and the clauses are unioned, so a category
//! with two predicates yields six clauses.
//!
//! User-supplied text never reaches the query verbatim: the name filter is
//! regex-escaped (it is a literal substring match) and then escaped for an
//! Overpass string literal.

use std::fmt::Write as _;

use wayfind_core::{Coordinate, OutputMode, TagPredicate};

use crate::types::ElementType;

pub const DEFAULT_RADIUS_M: u32 = 5000;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

#[derive(Debug, Clone)]
pub struct QueryParams<'a> {
    pub tags: &'a [TagPredicate],
    pub center: Coordinate,
    pub radius_m: u32,
    pub name_filter: Option<&'a str>,
    pub timeout_secs: u32,
    pub output: OutputMode,
}

impl<'a> QueryParams<'a> {
    #[must_use]
    pub fn new(tags: &'a [TagPredicate], center: Coordinate) -> Self {
        Self {
            tags,
            center,
            radius_m: DEFAULT_RADIUS_M,
            name_filter: None,
            timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            output: OutputMode::default(),
        }
    }

    #[must_use]
    pub fn radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Blank or whitespace-only filters are dropped.
    #[must_use]
    pub fn name_filter(mut self, filter: &'a str) -> Self {
        let trimmed = filter.trim();
        self.name_filter = (!trimmed.is_empty()).then_some(trimmed);
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

/// Render the Overpass QL text for `params`.
#[must_use]
pub fn build_query(params: &QueryParams<'_>) -> String {
    let area = format!(
        "(around:{},{},{})",
        params.radius_m,
        params.center.latitude(),
        params.center.longitude()
    );
    let name_clause = params
        .name_filter
        .map(|f| {
            let pattern = escape_literal(&regex::escape(f));
            format!("[\"name\"~\"{pattern}\",i]")
        })
        .unwrap_or_default();

    let mut query = format!("[out:json][timeout:{}];\n(\n", params.timeout_secs);
    for predicate in params.tags {
        let tag_clause = format!(
            "[\"{}\"=\"{}\"]",
            escape_literal(predicate.key),
            escape_literal(predicate.value)
        );
        for kind in ElementType::QUERYABLE {
            let kind = kind.as_str();
            // Writing to a String cannot fail.
            let _ = writeln!(query, "  {kind}{tag_clause}{name_clause}{area};");
        }
    }
    query.push_str(");\n");
    query.push_str(match params.output {
        OutputMode::Center => "out center;",
        OutputMode::Geom => "out geom;",
    });
    query
}

/// Escape `s` for use inside a double-quoted Overpass string literal.
///
/// Control characters are flattened to spaces; a raw newline would terminate
/// the statement.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
