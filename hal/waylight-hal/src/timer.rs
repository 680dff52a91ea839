//! Cycle-counter timing abstraction
//!
//! The LED bit protocol is produced by busy-waiting against a free-running
//! cycle counter. Timing constants are expressed in nanoseconds and
//! converted to ticks per target clock, so nothing in the protocol code
//! depends on a particular CPU frequency.
//!
//! Busy-waiting is only valid on a core where nothing else runs (no
//! preemption, no interrupts during emission). A hosted or preemptible
//! target must drive the protocol from a hardware timer/PWM/DMA peripheral
//! instead of implementing this trait.

/// Free-running cycle counter
///
/// The counter is allowed to wrap; waits are computed with wrapping
/// subtraction, so intervals up to `u32::MAX` ticks are handled correctly.
pub trait CycleCounter {
    /// Current counter value in ticks
    fn ticks(&self) -> u32;

    /// Counter frequency in Hz
    fn hz(&self) -> u32;
}

/// Convert a nanosecond interval to counter ticks, rounding up
///
/// Rounding up guarantees the emitted pulse is never shorter than the
/// requested time; the LED chipset tolerates slightly long pulses but not
/// short ones.
pub fn ns_to_ticks(hz: u32, ns: u32) -> u32 {
    (((ns as u64) * (hz as u64)).div_ceil(1_000_000_000)) as u32
}

/// Spin until `ns` nanoseconds have elapsed on `clock`
pub fn busy_wait_ns<C: CycleCounter>(clock: &C, ns: u32) {
    let start = clock.ticks();
    let wait = ns_to_ticks(clock.hz(), ns);
    while clock.ticks().wrapping_sub(start) < wait {}
}
