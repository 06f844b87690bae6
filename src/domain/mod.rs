pub mod area;
pub mod point;
pub mod shop;

pub use area::{Circle, ServiceArea, ServicePolygon};
pub use point::{CoordinateError, GeoPoint};
pub use shop::{
    FulfillmentCheck, FulfillmentOption, FulfillmentOptions, OUTSIDE_AREA_WARNING, ShopArea,
    ShopError,
};
