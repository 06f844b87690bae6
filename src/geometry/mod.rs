pub mod bounds;
pub mod haversine;
pub mod projection;
pub mod ray_cast;

pub use bounds::GeoBounds;
pub use haversine::{EARTH_RADIUS_METERS, haversine_distance};
pub use projection::LocalProjector;
pub use ray_cast::ring_contains;
