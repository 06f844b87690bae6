use thiserror::Error;

/// Why a vendor-supplied availability area was rejected
///
/// Every variant carries a message suitable for showing next to the form
/// field the vendor has to correct.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid circle center: {0}")]
    InvalidCenter(String),

    #[error("invalid circle radius: {0}")]
    InvalidRadius(String),

    #[error("invalid polygon ring: {0}")]
    InvalidRing(String),

    #[error("unknown availability area type: {0}")]
    UnknownAreaType(String),
}
