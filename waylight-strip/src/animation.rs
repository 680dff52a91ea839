//! Per-mode frame painting
//!
//! Maps the mailbox fields to a full-string pixel frame. Painting is a
//! pure function of `(mode, color, progress, sweep position)` so every
//! repaint is idempotent; the superloop re-derives the frame from the
//! mailbox on each cycle rather than tracking what changed.

use waylight_mailbox::{ColorClass, Grbw, Mode, STRIP_LEN};

/// One full-string pixel frame
///
/// Index 0 is the first (bottom) pixel on the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pixels: [Grbw; STRIP_LEN],
}

impl Frame {
    /// All pixels off
    pub const fn off() -> Self {
        Self {
            pixels: [Grbw::OFF; STRIP_LEN],
        }
    }

    /// Every pixel the same color
    pub const fn uniform(color: Grbw) -> Self {
        Self {
            pixels: [color; STRIP_LEN],
        }
    }

    /// The pixel colors, bottom of the string first
    pub fn pixels(&self) -> &[Grbw; STRIP_LEN] {
        &self.pixels
    }
}

/// Position state for the handbrake-reminder sweep
///
/// Advances one pixel per sub-step and wraps at the end of the string,
/// looping until the mode changes.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    pos: usize,
}

impl Sweep {
    /// Start a sweep at the bottom of the string
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position, then advance and wrap
    pub fn step(&mut self) -> usize {
        let pos = self.pos;
        self.pos = (self.pos + 1) % STRIP_LEN;
        pos
    }

    /// Restart from the bottom (called when the mode changes)
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

/// The status color for a raw color class word
///
/// Unknown words fall back to the default white rather than blanking;
/// a torn color write should still light something sensible.
fn status_color(color_word: u32) -> Grbw {
    ColorClass::from_word(color_word)
        .map(ColorClass::grbw)
        .unwrap_or(Grbw::WHITE)
}

/// Paint the frame for one repaint cycle
///
/// - `Travel`: pixels `0..progress` in the status color, the rest in the
///   pending placeholder
/// - `HandbrakeReminder`: exactly one accent pixel at `sweep_pos`
/// - `FlatSurface`: whole string in the status color
/// - disabled (`None`): all off
pub fn paint(mode: Option<Mode>, color_word: u32, progress: u32, sweep_pos: usize) -> Frame {
    match mode {
        Some(Mode::Travel) => {
            let lit = (progress as usize).min(STRIP_LEN);
            let mut frame = Frame::uniform(Grbw::PENDING);
            for px in &mut frame.pixels[..lit] {
                *px = status_color(color_word);
            }
            frame
        }
        Some(Mode::HandbrakeReminder) => {
            let mut frame = Frame::off();
            if sweep_pos < STRIP_LEN {
                frame.pixels[sweep_pos] = Grbw::ACCENT;
            }
            frame
        }
        Some(Mode::FlatSurface) => Frame::uniform(status_color(color_word)),
        None => Frame::off(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waylight_mailbox::DISABLE_SENTINEL;

    #[test]
    fn travel_lights_progress_prefix_in_status_color() {
        let frame = paint(Some(Mode::Travel), ColorClass::Good.as_word(), 3, 0);
        for (i, px) in frame.pixels().iter().enumerate() {
            if i < 3 {
                assert_eq!(*px, Grbw::GREEN, "pixel {i}");
            } else {
                assert_eq!(*px, Grbw::PENDING, "pixel {i}");
            }
        }
    }

    #[test]
    fn travel_progress_clamps_to_string_length() {
        let frame = paint(Some(Mode::Travel), ColorClass::Bad.as_word(), 200, 0);
        assert_eq!(*frame.pixels(), [Grbw::RED; STRIP_LEN]);
    }

    #[test]
    fn travel_with_zero_progress_is_all_pending() {
        let frame = paint(Some(Mode::Travel), ColorClass::Good.as_word(), 0, 0);
        assert_eq!(*frame.pixels(), [Grbw::PENDING; STRIP_LEN]);
    }

    #[test]
    fn unknown_color_class_falls_back_to_white() {
        let frame = paint(Some(Mode::FlatSurface), 99, 0, 0);
        assert_eq!(*frame.pixels(), [Grbw::WHITE; STRIP_LEN]);
    }

    #[test]
    fn handbrake_lights_exactly_one_accent_pixel() {
        for pos in 0..STRIP_LEN {
            let frame = paint(Some(Mode::HandbrakeReminder), 0, 0, pos);
            for (i, px) in frame.pixels().iter().enumerate() {
                if i == pos {
                    assert_eq!(*px, Grbw::ACCENT);
                } else {
                    assert_eq!(*px, Grbw::OFF);
                }
            }
        }
    }

    #[test]
    fn flat_surface_is_uniform_in_the_class_color() {
        let frame = paint(Some(Mode::FlatSurface), ColorClass::Decent.as_word(), 0, 0);
        assert_eq!(*frame.pixels(), [Grbw::YELLOW; STRIP_LEN]);
    }

    #[test]
    fn disabled_mode_blanks_the_string() {
        assert_eq!(paint(None, 0, 5, 0), Frame::off());
        assert_eq!(
            paint(Mode::from_word(DISABLE_SENTINEL), 2, 8, 3),
            Frame::off()
        );
    }

    #[test]
    fn sweep_wraps_at_the_end_of_the_string() {
        let mut sweep = Sweep::new();
        let positions: Vec<usize> = (0..STRIP_LEN * 2).map(|_| sweep.step()).collect();
        let expected: Vec<usize> = (0..STRIP_LEN).chain(0..STRIP_LEN).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn sweep_reset_returns_to_the_bottom() {
        let mut sweep = Sweep::new();
        sweep.step();
        sweep.step();
        sweep.reset();
        assert_eq!(sweep.step(), 0);
    }
}
