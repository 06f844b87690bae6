use crate::domain::GeoPoint;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Equirectangular projection between WGS84 and local meters
///
/// Uses the approximation:
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Good enough to size a bounding box around a delivery radius. Distances that
/// decide membership always go through the haversine formula instead.
#[derive(Debug, Clone)]
pub struct LocalProjector {
    center: GeoPoint,
    cos_lat: f64,
}

impl LocalProjector {
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_lat: center.latitude().to_radians().cos(),
        }
    }

    /// Project a point to local meters, (0, 0) at the center
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.longitude() - self.center.longitude()) * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.latitude() - self.center.latitude()) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Inverse of [`project`](Self::project), clamped to the valid WGS84 range
    ///
    /// Near the poles a metric offset spans every meridian, so longitude
    /// saturates at ±180.
    pub fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        let lat = self.center.latitude() + y / METERS_PER_DEGREE;
        let lon = if self.cos_lat.abs() < f64::EPSILON {
            if x >= 0.0 { 180.0 } else { -180.0 }
        } else {
            self.center.longitude() + x / (self.cos_lat * METERS_PER_DEGREE)
        };

        GeoPoint::from_valid(lon.clamp(-180.0, 180.0), lat.clamp(-90.0, 90.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sf() -> GeoPoint {
        GeoPoint::new(-122.4194, 37.7749).unwrap()
    }

    #[test]
    fn test_projector_center() {
        let proj = LocalProjector::new(sf());
        let (x, y) = proj.project(sf());
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km() {
        let proj = LocalProjector::new(sf());

        // 0.009 degrees of latitude ≈ 1 km
        let (_, y) = proj.project(GeoPoint::new(-122.4194, 37.7749 + 0.009).unwrap());
        assert!((y - 1000.0).abs() < 50.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let proj = LocalProjector::new(sf());
        let target = GeoPoint::new(-122.40, 37.79).unwrap();
        let (x, y) = proj.project(target);
        let back = proj.unproject(x, y);

        assert!((back.longitude() - target.longitude()).abs() < 1e-9);
        assert!((back.latitude() - target.latitude()).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_clamps_near_pole() {
        let proj = LocalProjector::new(GeoPoint::new(0.0, 89.99).unwrap());
        let corner = proj.unproject(50_000.0, 50_000.0);

        assert_eq!(corner.latitude(), 90.0);
        assert!(corner.longitude() <= 180.0);
    }
}
