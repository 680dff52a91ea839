//! Co-processor LED string engine
//!
//! Everything the bare-metal core runs: the software-timed bit protocol
//! for the addressable GRBW string, the per-mode animation painter, and
//! the superloop that polls the status mailbox and repaints.
//!
//! The engine is generic over the HAL traits. The board wiring (concrete
//! data pin, cycle counter, mailbox window address) lives outside this
//! workspace; a bare-metal launcher calls [`superloop::Superloop::poll_once`]
//! in its main loop and sleeps the returned delay between calls.
//!
//! The bit protocol relies on cycle-counted busy waits and is therefore
//! only correct when nothing else runs on the core. There is no shutdown
//! path beyond power-cycle; the host blanks the string by writing the
//! disabling mode sentinel.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod driver;
pub mod superloop;
pub mod waveform;

pub use animation::{paint, Frame, Sweep};
pub use driver::StripDriver;
pub use superloop::Superloop;
pub use waveform::{encode_word, Level, WaveformStep};
