//! plugit-geofence - Service area validation and geofencing for Plug-It shops

pub mod api;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod geometry;

pub use domain::{
    Circle, CoordinateError, FulfillmentCheck, FulfillmentOption, FulfillmentOptions, GeoPoint,
    ServiceArea, ServicePolygon, ShopArea, ShopError,
};
pub use evaluator::{RingClosure, ValidationError, Validator, contains, validate_area};
