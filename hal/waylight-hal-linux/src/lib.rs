//! Linux host implementations of the Waylight HAL traits
//!
//! The host side of the signaling subsystem runs on an embedded Linux
//! board whose co-processor memory and indicator LEDs are exposed by the
//! kernel: the shared mailbox region through `/dev/mem` and the onboard
//! LEDs through the sysfs LED class. Both are privileged interfaces;
//! failures to acquire them are configuration errors and fatal to the
//! caller, unlike runtime sensor hiccups which are recovered locally.

pub mod led;
pub mod mem;

pub use led::SysfsLed;
pub use mem::{MapError, PhysWindow};
