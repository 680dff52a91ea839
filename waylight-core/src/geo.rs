//! Great-circle distance math
//!
//! Positions are decimal degrees, distances kilometers. The haversine
//! formula on a spherical Earth is accurate to well under the arrival
//! threshold at trip scale, so no ellipsoid correction is carried.

use libm::{atan2, cos, sin, sqrt};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    /// Latitude, positive north
    pub lat_deg: f64,
    /// Longitude, positive east
    pub lon_deg: f64,
}

impl Coordinate {
    /// Create a coordinate from decimal degrees
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// True when both components are finite and inside geographic range
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && self.lat_deg.abs() <= 90.0
            && self.lon_deg.abs() <= 180.0
    }
}

fn deg_to_rad(deg: f64) -> f64 {
    deg * (core::f64::consts::PI / 180.0)
}

/// Haversine distance between two positions in kilometers
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = deg_to_rad(b.lat_deg - a.lat_deg);
    let dlon = deg_to_rad(b.lon_deg - a.lon_deg);

    let h = sin(dlat / 2.0) * sin(dlat / 2.0)
        + cos(deg_to_rad(a.lat_deg)) * cos(deg_to_rad(b.lat_deg)) * sin(dlon / 2.0)
            * sin(dlon / 2.0);

    let c = 2.0 * atan2(sqrt(h), sqrt(1.0 - h));

    EARTH_RADIUS_KM * c
}
