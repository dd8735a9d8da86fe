use crate::error::{Error, Result};

/// Numeric identifier for a solar system.
pub type LocationId = i64;

/// Reject identifiers that cannot name a location.
///
/// Solar system ids are always positive, so zero and negative values are
/// treated as a caller bug rather than as a lookup miss.
pub fn validate_location(id: LocationId) -> Result<LocationId> {
    if id > 0 {
        Ok(id)
    } else {
        Err(Error::InvalidLocation { id })
    }
}
