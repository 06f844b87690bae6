use crate::domain::GeoPoint;

/// Spherical Earth radius used for all service-area distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points
///
/// Treats the Earth as a sphere, which is accurate to well under 1% at the
/// municipal scales service areas are drawn at.
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let delta_phi = (to.latitude() - from.latitude()).to_radians();
    let delta_lambda = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
