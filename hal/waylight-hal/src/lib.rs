//! Waylight Hardware Abstraction Layer
//!
//! This crate defines the hardware traits consumed by the signaling
//! subsystem. Both execution domains implement them: the Linux host maps
//! the shared mailbox window and drives sysfs indicator LEDs; the
//! bare-metal co-processor supplies the data pin and cycle counter for
//! the LED bit protocol.
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - the LED string data line
//! - [`timer::CycleCounter`] - free-running counter for busy-wait timing
//! - [`mem::SharedWindow`] - a mapped view of the shared mailbox memory
//! - [`indicator::StatusIndicator`] - onboard single-color status LEDs

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod indicator;
pub mod mem;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use indicator::StatusIndicator;
pub use mem::{RamWindow, SharedWindow};
pub use timer::{busy_wait_ns, CycleCounter};
