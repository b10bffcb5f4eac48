//! IP geolocation for click enrichment.
//!
//! Provides a [`GeoLookup`] trait with two implementations:
//! - [`MaxMindGeoLookup`] - Local MaxMind City database
//! - [`NullGeoLookup`] - Returns no location, used when no database is configured

mod maxmind;
mod null_geo;
mod service;

pub use maxmind::MaxMindGeoLookup;
pub use null_geo::NullGeoLookup;
pub use service::{GeoLocation, GeoLookup, geo_lookup_from_path};
