//! Typed access to the status fields
//!
//! [`StatusWriter`] is the host-side view, [`StatusReader`] the
//! co-processor-side view. Single writer, single reader; writes are
//! fire-and-forget (if the co-processor is unpowered they simply land in
//! memory with no observable effect).

use waylight_hal::mem::SharedWindow;

use crate::color::Grbw;
use crate::layout::{COLOR_OFFSET, GPS_SIGNAL_OFFSET, MODE_OFFSET, PROGRESS_OFFSET};

/// Mode word the host writes before its process exits
///
/// Decodes as no known mode, which blanks the string on the next repaint.
pub const DISABLE_SENTINEL: u32 = 0xffff_ffff;

/// Animation mode selected by the arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Trip progress bar in the status color
    Travel,
    /// Single accent pixel sweeping the string
    HandbrakeReminder,
    /// Whole string in the surface-quality color
    FlatSurface,
}

impl Mode {
    /// Encode for the mailbox
    pub const fn as_word(self) -> u32 {
        match self {
            Mode::Travel => 0,
            Mode::HandbrakeReminder => 1,
            Mode::FlatSurface => 2,
        }
    }

    /// Decode from the mailbox; any unknown word disables the animation
    pub const fn from_word(word: u32) -> Option<Mode> {
        match word {
            0 => Some(Mode::Travel),
            1 => Some(Mode::HandbrakeReminder),
            2 => Some(Mode::FlatSurface),
            _ => None,
        }
    }
}

/// Three-level status color shared by every producer
///
/// Surface quality while parked, speed compliance while traveling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorClass {
    /// Red
    Bad,
    /// Yellow
    Decent,
    /// Green
    Good,
}

impl ColorClass {
    /// Encode for the mailbox
    pub const fn as_word(self) -> u32 {
        match self {
            ColorClass::Bad => 0,
            ColorClass::Decent => 1,
            ColorClass::Good => 2,
        }
    }

    /// Decode from the mailbox
    pub const fn from_word(word: u32) -> Option<ColorClass> {
        match word {
            0 => Some(ColorClass::Bad),
            1 => Some(ColorClass::Decent),
            2 => Some(ColorClass::Good),
            _ => None,
        }
    }

    /// The pixel color for this class
    pub const fn grbw(self) -> Grbw {
        match self {
            ColorClass::Bad => Grbw::RED,
            ColorClass::Decent => Grbw::YELLOW,
            ColorClass::Good => Grbw::GREEN,
        }
    }
}

/// One arbitration tick's worth of mailbox fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusUpdate {
    /// Mode word (a [`Mode`] encoding or [`DISABLE_SENTINEL`])
    pub mode: u32,
    /// Lit-LED count, already scaled to the string length
    pub progress: u32,
    /// Color class word
    pub color: u32,
    /// GPS fix validity
    pub gps_signal: bool,
}

/// Host-side mailbox view
#[derive(Debug)]
pub struct StatusWriter<W: SharedWindow> {
    window: W,
}

impl<W: SharedWindow> StatusWriter<W> {
    /// Wrap a mapped window
    pub fn new(window: W) -> Self {
        Self { window }
    }

    /// Publish one arbitration result, field by field
    pub fn write(&mut self, update: &StatusUpdate) {
        self.window.store_u32(PROGRESS_OFFSET, update.progress);
        self.window.store_u32(COLOR_OFFSET, update.color);
        self.window.store_u32(MODE_OFFSET, update.mode);
        self.window
            .store_u32(GPS_SIGNAL_OFFSET, update.gps_signal as u32);
    }

    /// Write the disabling sentinel; the string blanks on the next repaint
    pub fn disable(&mut self) {
        self.window.store_u32(MODE_OFFSET, DISABLE_SENTINEL);
    }

    /// Release the underlying window
    pub fn into_inner(self) -> W {
        self.window
    }
}

/// Co-processor-side mailbox view
#[derive(Debug)]
pub struct StatusReader<W: SharedWindow> {
    window: W,
}

impl<W: SharedWindow> StatusReader<W> {
    /// Wrap a mapped window
    pub fn new(window: W) -> Self {
        Self { window }
    }

    /// Lit-LED count
    pub fn progress(&self) -> u32 {
        self.window.load_u32(PROGRESS_OFFSET)
    }

    /// Raw color class word
    pub fn color_word(&self) -> u32 {
        self.window.load_u32(COLOR_OFFSET)
    }

    /// Raw mode word
    pub fn mode_word(&self) -> u32 {
        self.window.load_u32(MODE_OFFSET)
    }

    /// Decoded mode, `None` when the animation is disabled
    pub fn mode(&self) -> Option<Mode> {
        Mode::from_word(self.mode_word())
    }

    /// GPS fix validity (any nonzero word counts as a fix)
    pub fn gps_signal(&self) -> bool {
        self.window.load_u32(GPS_SIGNAL_OFFSET) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MAILBOX_LEN;
    use waylight_hal::mem::RamWindow;

    #[test]
    fn update_roundtrips_through_a_window() {
        let mut writer = StatusWriter::new(RamWindow::<MAILBOX_LEN>::new());
        writer.write(&StatusUpdate {
            mode: Mode::Travel.as_word(),
            progress: 5,
            color: ColorClass::Good.as_word(),
            gps_signal: true,
        });

        let reader = StatusReader::new(writer.into_inner());
        assert_eq!(reader.mode(), Some(Mode::Travel));
        assert_eq!(reader.progress(), 5);
        assert_eq!(ColorClass::from_word(reader.color_word()), Some(ColorClass::Good));
        assert!(reader.gps_signal());
    }

    #[test]
    fn disable_sentinel_decodes_as_no_mode() {
        let mut writer = StatusWriter::new(RamWindow::<MAILBOX_LEN>::new());
        writer.disable();
        let reader = StatusReader::new(writer.into_inner());
        assert_eq!(reader.mode_word(), DISABLE_SENTINEL);
        assert_eq!(reader.mode(), None);
    }

    #[test]
    fn unknown_mode_words_decode_as_none() {
        for word in [3u32, 7, 0x8000_0000, DISABLE_SENTINEL] {
            assert_eq!(Mode::from_word(word), None);
        }
    }

    #[test]
    fn mode_and_class_encodings_are_stable() {
        assert_eq!(Mode::Travel.as_word(), 0);
        assert_eq!(Mode::HandbrakeReminder.as_word(), 1);
        assert_eq!(Mode::FlatSurface.as_word(), 2);
        assert_eq!(ColorClass::Bad.as_word(), 0);
        assert_eq!(ColorClass::Decent.as_word(), 1);
        assert_eq!(ColorClass::Good.as_word(), 2);
    }

    #[test]
    fn class_colors_match_the_palette() {
        assert_eq!(ColorClass::Bad.grbw(), Grbw::RED);
        assert_eq!(ColorClass::Decent.grbw(), Grbw::YELLOW);
        assert_eq!(ColorClass::Good.grbw(), Grbw::GREEN);
    }
}
