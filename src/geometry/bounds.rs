use crate::domain::GeoPoint;

/// Longitude/latitude bounding box of a service area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bounds = Self {
            min_lon: first.longitude(),
            max_lon: first.longitude(),
            min_lat: first.latitude(),
            max_lat: first.latitude(),
        };
        bounds.expand(rest);

        Some(bounds)
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[GeoPoint]) {
        for point in points {
            self.min_lon = self.min_lon.min(point.longitude());
            self.max_lon = self.max_lon.max(point.longitude());
            self.min_lat = self.min_lat.min(point.latitude());
            self.max_lat = self.max_lat.max(point.latitude());
        }
    }

    pub fn width_degrees(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height_degrees(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Midpoint of the box, used as the map center for polygon areas
    pub fn center(&self) -> GeoPoint {
        GeoPoint::from_valid(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.longitude())
            && (self.min_lat..=self.max_lat).contains(&point.latitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
        raw.iter()
            .map(|&(lon, lat)| GeoPoint::new(lon, lat).unwrap())
            .collect()
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = GeoBounds::from_points(&points(&[(0.0, 0.0), (10.0, 20.0), (5.0, 10.0)]))
            .unwrap();

        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.max_lon, 10.0);
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lat, 20.0);
        assert_eq!(bounds.width_degrees(), 10.0);
        assert_eq!(bounds.height_degrees(), 20.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(GeoBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_center_and_contains() {
        let bounds =
            GeoBounds::from_points(&points(&[(-1.0, -2.0), (3.0, 4.0)])).unwrap();
        let center = bounds.center();

        assert_eq!(center.longitude(), 1.0);
        assert_eq!(center.latitude(), 1.0);
        assert!(bounds.contains(center));
        assert!(!bounds.contains(GeoPoint::new(3.5, 0.0).unwrap()));
    }
}
