//! Geo lookup trait and location type.

use std::sync::Arc;

use tracing::{info, warn};

use super::{MaxMindGeoLookup, NullGeoLookup};

/// Location resolved for an IP address. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLocation {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// IP to location resolver.
///
/// Lookups are synchronous and infallible: private, reserved, malformed or
/// unknown addresses resolve to [`GeoLocation::default`].
pub trait GeoLookup: Send + Sync {
    fn lookup(&self, ip: &str) -> GeoLocation;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Opens the MaxMind database at `path`, falling back to [`NullGeoLookup`]
/// when no path is configured or the file cannot be read.
pub fn geo_lookup_from_path(path: Option<&str>) -> Arc<dyn GeoLookup> {
    let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
        info!("GEOIP_DB_PATH not set, click locations will be empty");
        return Arc::new(NullGeoLookup::new());
    };

    match MaxMindGeoLookup::open(path) {
        Ok(lookup) => {
            info!(path, "Loaded GeoIP database");
            Arc::new(lookup)
        }
        Err(e) => {
            warn!(path, error = %e, "Failed to open GeoIP database, click locations will be empty");
            Arc::new(NullGeoLookup::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_falls_back_to_null() {
        assert_eq!(geo_lookup_from_path(None).name(), "null");
        assert_eq!(geo_lookup_from_path(Some("  ")).name(), "null");
    }

    #[test]
    fn test_unreadable_database_falls_back_to_null() {
        let lookup = geo_lookup_from_path(Some("/nonexistent/GeoLite2-City.mmdb"));

        assert_eq!(lookup.name(), "null");
        assert_eq!(lookup.lookup("8.8.8.8"), GeoLocation::default());
    }
}
