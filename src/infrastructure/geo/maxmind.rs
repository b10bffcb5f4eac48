//! MaxMind City database lookup.

use std::net::IpAddr;

use maxminddb::{Reader, geoip2};
use tracing::trace;

use super::service::{GeoLocation, GeoLookup};

/// Geo lookup backed by a MaxMind GeoLite2/GeoIP2 City `.mmdb` file read into memory.
pub struct MaxMindGeoLookup {
    reader: Reader<Vec<u8>>,
}

impl MaxMindGeoLookup {
    /// Reads the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns the reader error if the file is missing or is not a valid MMDB file.
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }

    fn lookup_city(&self, ip: IpAddr) -> Option<GeoLocation> {
        let result = self.reader.lookup(ip).ok()?;
        let city: geoip2::City = result.decode().ok()??;

        let region = city.subdivisions.first().and_then(|subdivision| {
            subdivision
                .iso_code
                .or(subdivision.names.english)
                .map(str::to_string)
        });

        Some(GeoLocation {
            country: city.country.iso_code.map(str::to_string),
            region,
            city: city.city.names.english.map(str::to_string),
            latitude: city.location.latitude,
            longitude: city.location.longitude,
        })
    }
}

impl GeoLookup for MaxMindGeoLookup {
    fn lookup(&self, ip: &str) -> GeoLocation {
        let Ok(addr) = ip.parse::<IpAddr>() else {
            return GeoLocation::default();
        };

        let location = self.lookup_city(addr).unwrap_or_default();
        trace!(ip, country = ?location.country, city = ?location.city, "MaxMind lookup");
        location
    }

    fn name(&self) -> &'static str {
        "maxmind"
    }
}
