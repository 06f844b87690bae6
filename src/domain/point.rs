use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a coordinate pair cannot become a [`GeoPoint`]
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("coordinates must be finite numbers, got ({longitude}, {latitude})")]
    NotFinite { longitude: f64, latitude: f64 },
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}

/// A WGS84 position with explicitly named axes.
///
/// The wire form is the GeoJSON order `[longitude, latitude]`. Everywhere else
/// the axes are reached by name, so callers never have to remember the order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range values
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordinateError::NotFinite {
                longitude,
                latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Build a point from values already known to be in range
    pub(crate) fn from_valid(longitude: f64, latitude: f64) -> Self {
        debug_assert!((-180.0..=180.0).contains(&longitude));
        debug_assert!((-90.0..=90.0).contains(&latitude));
        Self {
            longitude,
            latitude,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = CoordinateError;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::coord! { x: point.longitude, y: point.latitude }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.4}{} / {:.4}{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_range_limits() {
        assert!(GeoPoint::new(180.0, 90.0).is_ok());
        assert!(GeoPoint::new(-180.0, -90.0).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::new(200.0, 0.0),
            Err(CoordinateError::LongitudeOutOfRange(200.0))
        );
        assert_eq!(
            GeoPoint::new(0.0, -91.0),
            Err(CoordinateError::LatitudeOutOfRange(-91.0))
        );
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(CoordinateError::NotFinite { .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(CoordinateError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_wire_order_is_lon_lat() {
        let point = GeoPoint::new(-122.4194, 37.7749).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[-122.4194,37.7749]");

        let parsed: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.longitude(), -122.4194);
        assert_eq!(parsed.latitude(), 37.7749);
    }

    #[test]
    fn test_deserialize_rejects_swapped_pair() {
        // [lat, lng] with a longitude beyond the latitude range
        let result: Result<GeoPoint, _> = serde_json::from_str("[37.7749, -122.4194]");
        assert!(result.is_err());
    }

    #[test]
    fn test_geo_point_axes() {
        let point: geo::Point<f64> = GeoPoint::new(10.0, 20.0).unwrap().into();
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(-122.4194, 37.7749).unwrap();
        assert_eq!(point.to_string(), "37.7749N / 122.4194W");
    }
}
