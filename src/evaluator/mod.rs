//! Availability-area validation and membership
//!
//! [`Validator`] turns an untyped area payload (a form submission or an API
//! body) into a [`ServiceArea`]. [`contains`] answers whether a buyer's point
//! is served. Both are pure and safe to call from any thread.

mod error;
pub(crate) mod parse;

pub use error::ValidationError;

use serde_json::{Map, Value};

use crate::domain::{Circle, GeoPoint, ServiceArea, ServicePolygon};

/// What to do with a polygon whose last point differs from its first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingClosure {
    /// Append the first point to close the ring
    #[default]
    AutoClose,
    /// Reject the ring and tell the vendor which point closes it
    Reject,
}

/// Validates raw availability-area payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    ring_closure: RingClosure,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ring_closure(mut self, ring_closure: RingClosure) -> Self {
        self.ring_closure = ring_closure;
        self
    }

    pub fn ring_closure(&self) -> RingClosure {
        self.ring_closure
    }

    /// Validate a raw payload into a [`ServiceArea`]
    ///
    /// Accepted forms:
    /// - `{"type": "Circle", "center": [lng, lat], "radiusMeters": 500}`
    ///   (`radius` is accepted for `radiusMeters`, and `center` may be a GeoJSON Point)
    /// - `{"type": "Polygon", "coordinates": [[[lng, lat], ...]]}`
    ///   (a bare ring `[[lng, lat], ...]` is accepted for `coordinates`)
    pub fn validate(&self, raw: &Value) -> Result<ServiceArea, ValidationError> {
        let Some(object) = raw.as_object() else {
            return Err(ValidationError::UnknownAreaType(format!(
                "expected an object, got {}",
                raw
            )));
        };

        match object.get("type").and_then(Value::as_str) {
            Some("Circle") => self.validate_circle(object).map(ServiceArea::Circle),
            Some("Polygon") => self.validate_polygon(object).map(ServiceArea::Polygon),
            Some(other) => Err(ValidationError::UnknownAreaType(other.to_string())),
            None => Err(ValidationError::UnknownAreaType(
                "missing `type` field".to_string(),
            )),
        }
    }

    fn validate_circle(&self, object: &Map<String, Value>) -> Result<Circle, ValidationError> {
        let center = parse::point(object.get("center").unwrap_or(&Value::Null))
            .map_err(ValidationError::InvalidCenter)?;

        let raw_radius = object
            .get("radiusMeters")
            .or_else(|| object.get("radius"))
            .ok_or_else(|| ValidationError::InvalidRadius("missing".to_string()))?;
        let radius = parse::number(raw_radius).ok_or_else(|| {
            ValidationError::InvalidRadius(format!("{} is not a number", raw_radius))
        })?;

        Circle::new(center, radius)
    }

    fn validate_polygon(
        &self,
        object: &Map<String, Value>,
    ) -> Result<ServicePolygon, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidRing(reason);

        let coordinates = object
            .get("coordinates")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("missing coordinates array".to_string()))?;

        let ring = if coordinates.first().is_some_and(parse::is_position) {
            coordinates
        } else {
            match coordinates.as_slice() {
                [ring] => ring
                    .as_array()
                    .ok_or_else(|| invalid("ring is not an array".to_string()))?,
                [] => return Err(invalid("no ring given".to_string())),
                _ => {
                    return Err(invalid(format!(
                        "expected exactly one ring, got {}; holes are not supported",
                        coordinates.len()
                    )));
                }
            }
        };

        let points = ring
            .iter()
            .enumerate()
            .map(|(i, value)| parse::point(value).map_err(|e| invalid(format!("point {}: {}", i, e))))
            .collect::<Result<Vec<GeoPoint>, _>>()?;

        ServicePolygon::new(points, self.ring_closure)
    }
}

/// Validate a raw payload with the default (auto-closing) policy
pub fn validate_area(raw: &Value) -> Result<ServiceArea, ValidationError> {
    Validator::default().validate(raw)
}

/// Whether `point` is served by `area`
///
/// A shop without an area (pickup only) serves everywhere.
pub fn contains(area: Option<&ServiceArea>, point: GeoPoint) -> bool {
    area.is_none_or(|area| area.contains(point))
}
