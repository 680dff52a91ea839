//! Full-frame strip output
//!
//! Shifts a painted frame out pixel by pixel, then holds the latch so
//! the string displays it. The driver owns the data pin and the cycle
//! counter for the whole run; nothing else may touch the pin while a
//! frame is being emitted.

use waylight_hal::gpio::OutputPin;
use waylight_hal::timer::{busy_wait_ns, CycleCounter};

use crate::animation::Frame;
use crate::waveform::{emit_word, LATCH_NS};

/// Drives one LED string through a single GPIO line
#[derive(Debug)]
pub struct StripDriver<P, C> {
    pin: P,
    clock: C,
}

impl<P: OutputPin, C: CycleCounter> StripDriver<P, C> {
    /// Take ownership of the data pin and timing source
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Emit a frame and latch it
    ///
    /// The first frame pixel is shifted out first and lands in the first
    /// pixel on the string.
    pub fn write_frame(&mut self, frame: &Frame) {
        for color in frame.pixels() {
            emit_word(&mut self.pin, &self.clock, color.word());
        }
        self.latch();
    }

    /// Hold the line low long enough for the string to latch
    pub fn latch(&mut self) {
        self.pin.set_low();
        busy_wait_ns(&self.clock, LATCH_NS);
    }

    /// Release the pin and clock
    pub fn into_parts(self) -> (P, C) {
        (self.pin, self.clock)
    }
}
