//! Mailbox-driven repaint loop
//!
//! The co-processor runs exactly one job: read the mailbox, paint the
//! frame it describes, emit it, wait, repeat. The loop body is a
//! transition function on explicit state so the scheduling primitive
//! (a bare-metal main loop here, a test harness on the host) stays
//! outside.
//!
//! The mailbox is a level signal: whatever the fields say right now is
//! what gets painted, so a torn update self-corrects on the next cycle,
//! and the loop keeps polling even when the string looks unplugged.

use waylight_hal::gpio::OutputPin;
use waylight_hal::mem::SharedWindow;
use waylight_hal::timer::CycleCounter;
use waylight_mailbox::{Mode, StatusReader};

use crate::animation::{paint, Frame, Sweep};
use crate::driver::StripDriver;

/// Delay between ordinary repaints
pub const REDRAW_PERIOD_MS: u32 = 1000;

/// Delay between handbrake sweep sub-steps
pub const SWEEP_STEP_MS: u32 = 150;

/// Repaint state machine
#[derive(Debug, Default)]
pub struct Superloop {
    sweep: Sweep,
}

impl Superloop {
    /// Create a loop with the sweep parked at the bottom
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the next frame and inter-poll delay from the mailbox
    ///
    /// In the handbrake mode each call is one sweep sub-step and the
    /// returned delay is the sub-step time, so the mailbox gets re-read
    /// between steps and a mode change interrupts the sweep within one
    /// sub-step. Every other mode repaints on the full redraw period.
    pub fn plan<W: SharedWindow>(&mut self, mailbox: &StatusReader<W>) -> (Frame, u32) {
        let mode = mailbox.mode();
        match mode {
            Some(Mode::HandbrakeReminder) => {
                let pos = self.sweep.step();
                (paint(mode, mailbox.color_word(), 0, pos), SWEEP_STEP_MS)
            }
            _ => {
                self.sweep.reset();
                let frame = paint(mode, mailbox.color_word(), mailbox.progress(), 0);
                (frame, REDRAW_PERIOD_MS)
            }
        }
    }

    /// One full poll-paint-emit cycle; returns the delay until the next
    pub fn poll_once<W, P, C>(
        &mut self,
        mailbox: &StatusReader<W>,
        strip: &mut StripDriver<P, C>,
    ) -> u32
    where
        W: SharedWindow,
        P: OutputPin,
        C: CycleCounter,
    {
        let (frame, delay_ms) = self.plan(mailbox);
        strip.write_frame(&frame);
        delay_ms
    }
}
