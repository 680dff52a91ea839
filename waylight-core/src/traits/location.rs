//! GPS location collaborator

use crate::geo::Coordinate;

/// One GPS fix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fix {
    /// Position in decimal degrees
    pub coord: Coordinate,
    /// Ground speed in km/h
    pub speed_kmh: f64,
}

/// Source of GPS fixes
///
/// `None` covers both "no hardware response" and "sentence marked void";
/// the caller freezes its last-known state rather than treating either as
/// an error.
pub trait LocationSource {
    /// The most recent fix, if the receiver currently has one
    fn current_fix(&self) -> Option<Fix>;
}
