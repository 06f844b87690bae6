use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::domain::GeoPoint;
use crate::evaluator::{RingClosure, ValidationError, validate_area};
use crate::geometry::{GeoBounds, LocalProjector, haversine_distance, ring_contains};

/// A delivery/meetup radius around a center point
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: GeoPoint,
    radius_meters: f64,
}

impl Circle {
    pub fn new(center: GeoPoint, radius_meters: f64) -> Result<Self, ValidationError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(ValidationError::InvalidRadius(format!(
                "{} must be a positive number of meters",
                radius_meters
            )));
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        haversine_distance(self.center, point) <= self.radius_meters
    }

    /// Box spanning the radius in every direction from the center
    pub fn bounds(&self) -> GeoBounds {
        let projector = LocalProjector::new(self.center);
        let r = self.radius_meters;
        let corners = [projector.unproject(-r, -r), projector.unproject(r, r)];
        GeoBounds::from_points(&corners).unwrap_or(GeoBounds {
            min_lon: self.center.longitude(),
            max_lon: self.center.longitude(),
            min_lat: self.center.latitude(),
            max_lat: self.center.latitude(),
        })
    }
}

/// A closed ring of at least three distinct vertices
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePolygon {
    ring: Vec<GeoPoint>,
}

impl ServicePolygon {
    /// Validate a ring, closing it first when `closure` allows
    pub fn new(mut ring: Vec<GeoPoint>, closure: RingClosure) -> Result<Self, ValidationError> {
        let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
            return Err(ValidationError::InvalidRing("ring has no points".to_string()));
        };

        if first != last {
            match closure {
                RingClosure::AutoClose => {
                    debug!(
                        vertices = ring.len(),
                        "closing open ring by repeating its first point"
                    );
                    ring.push(first);
                }
                RingClosure::Reject => {
                    return Err(ValidationError::InvalidRing(format!(
                        "ring is not closed; append [{}, {}] to close it",
                        first.longitude(),
                        first.latitude()
                    )));
                }
            }
        }

        let distinct = distinct_vertices(&ring[..ring.len() - 1]);
        if distinct < 3 {
            return Err(ValidationError::InvalidRing(format!(
                "ring needs at least 3 distinct points, found {}",
                distinct
            )));
        }

        Ok(Self { ring })
    }

    /// The closed ring; the last point repeats the first
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        ring_contains(&self.ring, point)
    }

    pub fn bounds(&self) -> GeoBounds {
        // A validated ring always has points
        GeoBounds::from_points(&self.ring).unwrap_or(GeoBounds {
            min_lon: 0.0,
            max_lon: 0.0,
            min_lat: 0.0,
            max_lat: 0.0,
        })
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: geo::LineString<f64> =
            self.ring.iter().map(|&p| geo::Coord::from(p)).collect();
        geo::Polygon::new(exterior, vec![])
    }
}

fn distinct_vertices(vertices: &[GeoPoint]) -> usize {
    // `+ 0.0` folds -0.0 into 0.0 so the two compare as one key
    let mut keys: Vec<(f64, f64)> = vertices
        .iter()
        .map(|p| (p.longitude() + 0.0, p.latitude() + 0.0))
        .collect();
    keys.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    keys.dedup();
    keys.len()
}

/// The region a shop delivers to or meets buyers in
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceArea {
    Circle(Circle),
    Polygon(ServicePolygon),
}

impl ServiceArea {
    pub fn contains(&self, point: GeoPoint) -> bool {
        match self {
            ServiceArea::Circle(circle) => circle.contains(point),
            ServiceArea::Polygon(polygon) => polygon.contains(point),
        }
    }

    pub fn bounds(&self) -> GeoBounds {
        match self {
            ServiceArea::Circle(circle) => circle.bounds(),
            ServiceArea::Polygon(polygon) => polygon.bounds(),
        }
    }

    /// Circle center, or the bounding-box center of a polygon
    pub fn center(&self) -> GeoPoint {
        match self {
            ServiceArea::Circle(circle) => circle.center(),
            ServiceArea::Polygon(polygon) => polygon.bounds().center(),
        }
    }

    /// Haversine meters from `point` to [`center`](Self::center)
    pub fn distance_to_center(&self, point: GeoPoint) -> f64 {
        haversine_distance(self.center(), point)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServiceArea::Circle(_) => "Circle",
            ServiceArea::Polygon(_) => "Polygon",
        }
    }
}

/// Persisted shape of a [`ServiceArea`]
#[derive(Serialize)]
#[serde(tag = "type")]
enum StoredArea<'a> {
    Circle {
        center: GeoPoint,
        #[serde(rename = "radiusMeters")]
        radius_meters: f64,
    },
    Polygon {
        coordinates: [&'a [GeoPoint]; 1],
    },
}

impl Serialize for ServiceArea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let stored = match self {
            ServiceArea::Circle(circle) => StoredArea::Circle {
                center: circle.center,
                radius_meters: circle.radius_meters,
            },
            ServiceArea::Polygon(polygon) => StoredArea::Polygon {
                coordinates: [polygon.ring.as_slice()],
            },
        };
        stored.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServiceArea {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        validate_area(&raw).map_err(serde::de::Error::custom)
    }
}
