pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use error::OverpassError;
pub use normalize::{normalize_and_rank, normalize_element, rank_places, Place};
pub use query::{build_query, QueryParams, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_RADIUS_M};
pub use types::{ElementCenter, ElementType, OverpassResponse, RawElement};
