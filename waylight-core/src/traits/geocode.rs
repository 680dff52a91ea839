//! Address geocoding collaborator

use core::fmt;

use crate::geo::Coordinate;

/// Errors a geocoding backend can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeocodeError {
    /// Transport failure (timeout, connection refused, HTTP error)
    Network,
    /// The service answered but found no match for the address
    NoMatch,
    /// The service answered with something we could not decode
    InvalidResponse,
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Network => write!(f, "geocoding request failed"),
            GeocodeError::NoMatch => write!(f, "no results for the given address"),
            GeocodeError::InvalidResponse => write!(f, "unparseable geocoding response"),
        }
    }
}

/// Resolves a human-readable address to a position
///
/// Calls are blocking and fallible; the backend bounds its own request
/// time. There is no automatic retry: a failed resolution is surfaced to
/// the operator.
pub trait Geocoder {
    /// Resolve `address` to a coordinate
    fn resolve(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}
