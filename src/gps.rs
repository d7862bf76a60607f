//! Module with GPS specific structures
use serde::Serialize;
use std::fmt;

/// Stores a single geospatial point
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Location {
    /// latitude coordinate in degrees
    latitude: f64,
    /// longitude coordinate in degrees
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// Create a location from a GeoJSON style `[longitude, latitude]` pair.
    ///
    /// External geometry (e.g. a directions response) lists longitude first, every such
    /// pair must pass through here before it is drawn.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Location {
            latitude: pair[1],
            longitude: pair[0],
        }
    }

    /// Finite and within -90..=90 degrees
    pub fn is_valid_latitude(value: f64) -> bool {
        value.is_finite() && (-90.0..=90.0).contains(&value)
    }

    /// Finite and within -180..=180 degrees
    pub fn is_valid_longitude(value: f64) -> bool {
        value.is_finite() && (-180.0..=180.0).contains(&value)
    }

    /// Return latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Return longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.latitude, self.longitude)
    }
}

/// Smallest lat/lon aligned rectangle containing a set of locations
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    southwest: Location,
    northeast: Location,
}

impl BoundingBox {
    /// Compute the per-axis min/max over all locations, `None` if there are none
    pub fn from_locations(locations: &[Location]) -> Option<Self> {
        let first = locations.first()?;
        let init = BoundingBox {
            southwest: *first,
            northeast: *first,
        };
        Some(locations[1..].iter().fold(init, |bbox, loc| BoundingBox {
            southwest: Location::new(
                bbox.southwest.latitude.min(loc.latitude),
                bbox.southwest.longitude.min(loc.longitude),
            ),
            northeast: Location::new(
                bbox.northeast.latitude.max(loc.latitude),
                bbox.northeast.longitude.max(loc.longitude),
            ),
        }))
    }

    pub fn southwest(&self) -> Location {
        self.southwest
    }

    pub fn northeast(&self) -> Location {
        self.northeast
    }

    /// Return a copy grown by `margin` degrees on every side
    pub fn padded(&self, margin: f64) -> Self {
        BoundingBox {
            southwest: Location::new(
                self.southwest.latitude - margin,
                self.southwest.longitude - margin,
            ),
            northeast: Location::new(
                self.northeast.latitude + margin,
                self.northeast.longitude + margin,
            ),
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.southwest, self.northeast)
    }
}
