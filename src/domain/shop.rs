use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::domain::{GeoPoint, ServiceArea};
use crate::evaluator::{ValidationError, Validator, parse};

/// Shown to buyers whose location falls outside the shop's area
pub const OUTSIDE_AREA_WARNING: &str =
    "Selected location is outside the shop's availability area. The order is more likely to be refused.";

/// How a buyer receives an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentOption {
    Pickup,
    Delivery,
    Meetup,
}

impl fmt::Display for FulfillmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FulfillmentOption::Pickup => "pickup",
            FulfillmentOption::Delivery => "delivery",
            FulfillmentOption::Meetup => "meetup",
        };
        f.write_str(name)
    }
}

/// Fulfillment options a shop has enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentOptions {
    pub pickup: bool,
    pub delivery: bool,
    pub meetup: bool,
}

impl Default for FulfillmentOptions {
    fn default() -> Self {
        Self {
            pickup: true,
            delivery: false,
            meetup: false,
        }
    }
}

impl FulfillmentOptions {
    pub fn offers(&self, option: FulfillmentOption) -> bool {
        match option {
            FulfillmentOption::Pickup => self.pickup,
            FulfillmentOption::Delivery => self.delivery,
            FulfillmentOption::Meetup => self.meetup,
        }
    }

    /// Delivery and meetup need an area; pickup alone does not
    pub fn requires_area(&self) -> bool {
        self.delivery || self.meetup
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("malformed shop record: {0}")]
    Malformed(String),

    #[error("invalid shop location: {0}")]
    InvalidLocation(String),

    #[error("shops offering delivery or meetup must define an availability area")]
    MissingArea,

    #[error(transparent)]
    Area(#[from] ValidationError),
}

/// Outcome of checking a buyer's choice against a shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentCheck {
    /// The shop does not offer this option
    OptionUnavailable(FulfillmentOption),
    /// Pickup, or no area declared; any location is fine
    Unrestricted,
    /// Delivery/meetup chosen but no location supplied yet
    LocationRequired,
    Inside,
    Outside,
}

impl FulfillmentCheck {
    /// Message to show the buyer, if any. None of these block the order.
    pub fn warning(&self) -> Option<String> {
        match self {
            FulfillmentCheck::OptionUnavailable(option) => {
                Some(format!("This shop does not offer {}.", option))
            }
            FulfillmentCheck::LocationRequired => {
                Some("Select a location to check it against the shop's availability area.".to_string())
            }
            FulfillmentCheck::Outside => Some(OUTSIDE_AREA_WARNING.to_string()),
            FulfillmentCheck::Unrestricted | FulfillmentCheck::Inside => None,
        }
    }
}

/// The geofencing-relevant part of a shop record
#[derive(Debug, Clone, PartialEq)]
pub struct ShopArea {
    name: String,
    location: GeoPoint,
    fulfillment_options: FulfillmentOptions,
    availability_area: Option<ServiceArea>,
}

impl ShopArea {
    /// Validate a stored or submitted shop document
    ///
    /// Reads `name`, `location` (GeoJSON Point), `fulfillmentOptions` and
    /// `availabilityArea`. Other fields are ignored.
    pub fn validate(raw: &Value, validator: &Validator) -> Result<Self, ShopError> {
        let object = raw
            .as_object()
            .ok_or_else(|| ShopError::Malformed(format!("expected an object, got {}", raw)))?;

        let name = match object.get("name") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(name)) => name.trim().to_string(),
            Some(other) => {
                return Err(ShopError::Malformed(format!("name {} is not a string", other)));
            }
        };

        let location = parse::point(object.get("location").unwrap_or(&Value::Null))
            .map_err(ShopError::InvalidLocation)?;

        let fulfillment_options = match object.get("fulfillmentOptions") {
            None | Some(Value::Null) => FulfillmentOptions::default(),
            Some(value) => FulfillmentOptions::deserialize(value)
                .map_err(|e| ShopError::Malformed(format!("fulfillmentOptions: {}", e)))?,
        };

        let availability_area = match object.get("availabilityArea") {
            None | Some(Value::Null) => None,
            Some(value) => Some(validator.validate(value)?),
        };

        Self::new(name, location, fulfillment_options, availability_area)
    }

    /// Enforce the pairing between fulfillment options and the area
    pub fn new(
        name: String,
        location: GeoPoint,
        fulfillment_options: FulfillmentOptions,
        availability_area: Option<ServiceArea>,
    ) -> Result<Self, ShopError> {
        let availability_area = match (fulfillment_options.requires_area(), availability_area) {
            (true, None) => return Err(ShopError::MissingArea),
            (false, Some(area)) => {
                debug!(
                    shop = %name,
                    area = area.kind(),
                    "dropping availability area from pickup-only shop"
                );
                None
            }
            (_, area) => area,
        };

        Ok(Self {
            name,
            location,
            fulfillment_options,
            availability_area,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn fulfillment_options(&self) -> FulfillmentOptions {
        self.fulfillment_options
    }

    pub fn availability_area(&self) -> Option<&ServiceArea> {
        self.availability_area.as_ref()
    }

    /// Check a buyer's fulfillment choice and location against this shop
    pub fn check(&self, option: FulfillmentOption, point: Option<GeoPoint>) -> FulfillmentCheck {
        if !self.fulfillment_options.offers(option) {
            return FulfillmentCheck::OptionUnavailable(option);
        }
        if option == FulfillmentOption::Pickup {
            return FulfillmentCheck::Unrestricted;
        }
        let Some(area) = &self.availability_area else {
            return FulfillmentCheck::Unrestricted;
        };
        let Some(point) = point else {
            return FulfillmentCheck::LocationRequired;
        };

        if area.contains(point) {
            FulfillmentCheck::Inside
        } else {
            FulfillmentCheck::Outside
        }
    }
}
