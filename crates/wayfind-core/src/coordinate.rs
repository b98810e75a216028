//! WGS84 coordinates and great-circle distance.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("expected \"lat,lon\", got \"{0}\"")]
    Malformed(String),
}

/// A latitude/longitude pair in decimal degrees.
///
/// Fields are read-only; build one through [`Coordinate::new`] so that the
/// range check always runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either component is out of range or NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(lat, lon)
    }
}

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let a = coord(40.7128, -74.006);
        assert!(haversine_km(a, a).abs() < f64::EPSILON);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = coord(52.52, 13.405);
        let b = coord(48.8566, 2.3522);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn haversine_one_degree_latitude_at_equator() {
        let d = haversine_km(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn haversine_berlin_paris() {
        let d = haversine_km(coord(52.52, 13.405), coord(48.8566, 2.3522));
        assert!((d - 878.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parses_lat_lon_pair() {
        let c: Coordinate = "40.7128, -74.0060".parse().unwrap();
        assert!((c.latitude() - 40.7128).abs() < 1e-9);
        assert!((c.longitude() + 74.006).abs() < 1e-9);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "somewhere".parse::<Coordinate>(),
            Err(CoordinateError::Malformed(_))
        ));
        assert!(matches!(
            "12.0,abc".parse::<Coordinate>(),
            Err(CoordinateError::Malformed(_))
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let c = coord(40.0, -74.0);
        assert_eq!(c.to_string(), "40,-74");
        assert_eq!(c.to_string().parse::<Coordinate>().unwrap(), c);
    }
}
