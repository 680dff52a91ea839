//! Concrete collaborator backends
//!
//! Only the geocoder has an implementation in this workspace; GPS,
//! accelerometer, and speed compliance are thin I/O wrappers supplied by
//! the launcher against the traits in `waylight_core::traits`.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;
