use crate::domain::GeoPoint;

/// Even-odd point-in-polygon test over a ring of vertices
///
/// Longitude is the horizontal axis and latitude the vertical one. A ray is
/// cast from `point` towards increasing longitude and every edge it crosses
/// flips the result. The ring may or may not repeat its first vertex; the
/// zero-length closing edge never counts as a crossing.
///
/// Exact for simple polygons. Points lying exactly on an edge may land on
/// either side.
pub fn ring_contains(ring: &[GeoPoint], point: GeoPoint) -> bool {
    let Some(mut previous) = ring.last() else {
        return false;
    };

    let px = point.longitude();
    let py = point.latitude();
    let mut inside = false;

    for vertex in ring {
        let (xi, yi) = (vertex.longitude(), vertex.latitude());
        let (xj, yj) = (previous.longitude(), previous.latitude());

        // The first comparison guarantees yi != yj before dividing
        if (yi > py) != (yj > py) && px < xi + (xj - xi) * (py - yi) / (yj - yi) {
            inside = !inside;
        }

        previous = vertex;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    fn ring(points: &[(f64, f64)]) -> Vec<GeoPoint> {
        points
            .iter()
            .map(|&(lon, lat)| GeoPoint::new(lon, lat).unwrap())
            .collect()
    }

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new(lon, lat).unwrap()
    }

    #[test]
    fn test_unit_square() {
        let square = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(ring_contains(&square, point(0.5, 0.5)));
        assert!(!ring_contains(&square, point(2.0, 2.0)));
        assert!(!ring_contains(&square, point(-0.5, 0.5)));
        assert!(!ring_contains(&square, point(0.5, 1.5)));
    }

    #[test]
    fn test_open_ring_behaves_like_closed() {
        let open = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(ring_contains(&open, point(0.25, 0.75)));
        assert!(!ring_contains(&open, point(1.25, 0.75)));
    }

    #[test]
    fn test_concave_notch() {
        // U shape opening north, notch between x=1 and x=2 above y=1
        let u = ring(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
            (0.0, 0.0),
        ]);
        assert!(ring_contains(&u, point(0.5, 2.0)));
        assert!(ring_contains(&u, point(2.5, 2.0)));
        assert!(ring_contains(&u, point(1.5, 0.5)));
        assert!(!ring_contains(&u, point(1.5, 2.0)));
    }

    #[test]
    fn test_empty_ring() {
        assert!(!ring_contains(&[], point(0.0, 0.0)));
    }

    #[test]
    fn test_agrees_with_geo_for_convex_interior() {
        let hexagon = ring(&[
            (-122.45, 37.76),
            (-122.42, 37.74),
            (-122.39, 37.76),
            (-122.39, 37.79),
            (-122.42, 37.81),
            (-122.45, 37.79),
            (-122.45, 37.76),
        ]);
        let polygon = geo::Polygon::new(
            hexagon.iter().map(|&p| geo::Coord::from(p)).collect(),
            vec![],
        );

        for i in 0..20 {
            for j in 0..20 {
                let lon = -122.4587 + f64::from(i) * 0.004;
                let lat = 37.7313 + f64::from(j) * 0.005;
                let candidate = point(lon, lat);
                let expected = polygon.contains(&geo::Point::from(candidate));
                assert_eq!(
                    ring_contains(&hexagon, candidate),
                    expected,
                    "disagreement at ({}, {})",
                    lon,
                    lat
                );
            }
        }
    }
}
