//! Software-timed bit protocol for the GRBW string
//!
//! One color word is 32 bits shifted out MSB-first on a single GPIO
//! line. Each bit is a high pulse followed by a low pulse; the pulse
//! lengths encode the bit value. The high/low times are asymmetric:
//! they were tuned on hardware against cycle-counted busy-wait loops,
//! not taken from the chipset's nominal symmetric bit period.
//!
//! After the last bit of the last pixel the line must stay low for the
//! latch time; cutting it short corrupts the latch state of every
//! downstream pixel.
//!
//! There is no feedback from the string, so correctness is only
//! observable on hardware. The sequence generator here is pure so tests
//! can assert the exact ordered `(level, duration)` pairs instead.

use heapless::Vec;
use waylight_hal::gpio::OutputPin;
use waylight_hal::timer::{busy_wait_ns, CycleCounter};

/// High time of a one bit
pub const ONE_HIGH_NS: u32 = 700;
/// Low time of a one bit
pub const ONE_LOW_NS: u32 = 600;
/// High time of a zero bit
pub const ZERO_HIGH_NS: u32 = 350;
/// Low time of a zero bit
pub const ZERO_LOW_NS: u32 = 800;
/// Latch hold time; the chipset needs at least 50 µs, 60 gives margin
pub const LATCH_NS: u32 = 60_000;

/// Bits per color word
pub const BITS_PER_WORD: usize = 32;

/// Steps per color word (one high and one low step per bit)
pub const STEPS_PER_WORD: usize = BITS_PER_WORD * 2;

/// Line level of one waveform step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Line driven low
    Low,
    /// Line driven high
    High,
}

/// One timed segment of the output waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveformStep {
    /// Line level during this step
    pub level: Level,
    /// Step duration in nanoseconds
    pub ns: u32,
}

/// The ordered waveform for one color word, MSB first
pub fn encode_word(word: u32) -> Vec<WaveformStep, STEPS_PER_WORD> {
    let mut steps = Vec::new();
    for bit_index in (0..BITS_PER_WORD).rev() {
        let one = (word >> bit_index) & 1 == 1;
        let (high_ns, low_ns) = if one {
            (ONE_HIGH_NS, ONE_LOW_NS)
        } else {
            (ZERO_HIGH_NS, ZERO_LOW_NS)
        };
        // Capacity is exactly two steps per bit.
        let _ = steps.push(WaveformStep {
            level: Level::High,
            ns: high_ns,
        });
        let _ = steps.push(WaveformStep {
            level: Level::Low,
            ns: low_ns,
        });
    }
    steps
}

/// Shift one color word out on the data line
///
/// Emits exactly the sequence [`encode_word`] describes, pacing each
/// step with a cycle-counted busy wait.
pub fn emit_word<P: OutputPin, C: CycleCounter>(pin: &mut P, clock: &C, word: u32) {
    for step in encode_word(word) {
        pin.set_state(step.level == Level::High);
        busy_wait_ns(clock, step.ns);
    }
}
