//! User position acquisition.
//!
//! A failed lookup is never fatal: [`acquire`] substitutes the fallback
//! coordinate and reports [`LocationStatus::Unavailable`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use wayfind_core::Coordinate;

use crate::error::LocateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationStatus {
    #[default]
    Pending,
    Found,
    Unavailable,
}

impl LocationStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LocationStatus::Pending => "Getting location...",
            LocationStatus::Found => "Location found",
            LocationStatus::Unavailable => "Location unavailable",
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of [`acquire`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    pub coordinate: Coordinate,
    pub status: LocationStatus,
}

/// Source of the user's current position.
pub trait Geolocator {
    fn locate(&self) -> impl Future<Output = Result<Coordinate, LocateError>> + Send;
}

/// A position known up front, or `None` when the platform has no
/// geolocation capability.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Option<Coordinate>);

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        self.0.ok_or(LocateError::Unsupported)
    }
}

/// IP-based lookup against an ip-api compatible JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpApiLocator {
    /// # Errors
    ///
    /// Returns [`LocateError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LocateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl Geolocator for IpApiLocator {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let body: IpApiResponse = response.json().await?;

        if body.status != "success" {
            return Err(LocateError::Denied(
                body.message.unwrap_or_else(|| body.status.clone()),
            ));
        }
        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocateError::Denied("no position in response".to_string()));
        };
        let coordinate = Coordinate::new(lat, lon)?;
        tracing::debug!(
            city = body.city.as_deref().unwrap_or(""),
            "ip geolocation resolved"
        );
        Ok(coordinate)
    }
}

/// Resolve the user position, falling back to `fallback` on any failure.
pub async fn acquire<G: Geolocator>(geolocator: &G, fallback: Coordinate) -> Located {
    match geolocator.locate().await {
        Ok(coordinate) => {
            tracing::info!(%coordinate, "location found");
            Located {
                coordinate,
                status: LocationStatus::Found,
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                %fallback,
                "location unavailable; using fallback"
            );
            Located {
                coordinate: fallback,
                status: LocationStatus::Unavailable,
            }
        }
    }
}
