//! Host polling tasks
//!
//! One thread per module, each on its own fixed period. Threads share
//! state only through lock-guarded aggregates; collaborator calls happen
//! with no lock held. Every task stops cooperatively: `stop` clears the
//! running flag and joins, and the loop observes the flag at its next
//! tick, so shutdown latency is bounded by one poll period.

pub mod arbiter;
pub mod location;
pub mod parking;
pub mod tracker;

pub use arbiter::ArbiterTask;
pub use location::{LocationTask, SharedFix};
pub use parking::{ParkingSnapshot, ParkingTask};
pub use tracker::{TrackerTask, TripProbe};
