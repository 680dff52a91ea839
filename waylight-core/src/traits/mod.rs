//! Collaborator boundaries
//!
//! The signaling subsystem consumes a handful of external services (GPS,
//! geocoding, accelerometer, speed compliance). These traits pin down
//! exactly what it needs from each so the surrounding I/O wrappers stay
//! outside this workspace and the state machines stay testable with
//! stubs.
//!
//! Every call here may block inside the collaborator, but each
//! collaborator bounds its own call time; callers must never invoke one
//! while holding an aggregate lock.

pub mod accel;
pub mod geocode;
pub mod location;
pub mod speed;

pub use accel::AccelerometerSource;
pub use geocode::{GeocodeError, Geocoder};
pub use location::{Fix, LocationSource};
pub use speed::SpeedCompliance;
