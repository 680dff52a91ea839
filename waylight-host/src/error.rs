//! Host-side error types

use std::fmt;

use waylight_core::traits::geocode::GeocodeError;
use waylight_core::trip::TripError;

/// Errors surfaced by the daemon's operator-facing calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Address could not be resolved; the trip stays idle
    Geocode(GeocodeError),
    /// No valid GPS fix was available when the target was set
    NoFix,
    /// The trip tracker rejected the start
    Trip(TripError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Geocode(e) => write!(f, "geocoding failed: {e}"),
            HostError::NoFix => write!(f, "no valid GPS fix available"),
            HostError::Trip(e) => write!(f, "could not start trip: {e}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<GeocodeError> for HostError {
    fn from(e: GeocodeError) -> Self {
        HostError::Geocode(e)
    }
}

impl From<TripError> for HostError {
    fn from(e: TripError) -> Self {
        HostError::Trip(e)
    }
}
