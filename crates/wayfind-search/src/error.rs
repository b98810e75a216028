use thiserror::Error;
use wayfind_core::UnknownCategory;
use wayfind_overpass::OverpassError;

/// Message shown to the user for any upstream failure.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search places. Please try again.";

/// Reasons the platform position could not be obtained. Always recovered by
/// substituting the fallback coordinate.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("geolocation is not available")]
    Unsupported,

    #[error("geolocation denied: {0}")]
    Denied(String),

    #[error("geolocation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geolocation returned an invalid position: {0}")]
    InvalidPosition(#[from] wayfind_core::CoordinateError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error(transparent)]
    Upstream(#[from] OverpassError),
}

impl SearchError {
    /// Text suitable for the status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SearchError::UnknownCategory(e) => e.to_string(),
            SearchError::Upstream(_) => SEARCH_FAILED_MESSAGE.to_string(),
        }
    }
}
