//! Geo lookup that never resolves a location.

use super::service::{GeoLocation, GeoLookup};
use tracing::debug;

/// Used when no GeoIP database is configured or it failed to load.
pub struct NullGeoLookup;

impl NullGeoLookup {
    pub fn new() -> Self {
        debug!("Using NullGeoLookup (geolocation disabled)");
        Self
    }
}

impl Default for NullGeoLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLookup for NullGeoLookup {
    fn lookup(&self, _ip: &str) -> GeoLocation {
        GeoLocation::default()
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
