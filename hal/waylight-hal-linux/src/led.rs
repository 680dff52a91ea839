//! Sysfs LED class indicators
//!
//! The board's onboard LEDs live under `/sys/class/leds/<name>/` with
//! `trigger` and `brightness` attributes. The kernel normally blinks
//! them on its own triggers; taking one over means writing `none` to the
//! trigger first, then driving `brightness` directly.
//!
//! Runtime write failures are logged and swallowed: a dead indicator
//! must never take the signaling daemon down with it.

use std::fs;
use std::io;
use std::path::PathBuf;

use waylight_hal::indicator::StatusIndicator;

/// One LED under the sysfs LED class
#[derive(Debug, Clone)]
pub struct SysfsLed {
    dir: PathBuf,
}

impl SysfsLed {
    /// Claim the LED at `dir`, releasing it from its kernel trigger
    ///
    /// Fails when the directory is not a writable LED class entry; that
    /// is a configuration error the caller should treat as fatal.
    pub fn claim(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let led = Self { dir: dir.into() };
        led.write_attr("trigger", "none")?;
        Ok(led)
    }

    fn write_attr(&self, name: &str, value: &str) -> io::Result<()> {
        fs::write(self.dir.join(name), value)
    }
}

impl StatusIndicator for SysfsLed {
    fn set_on(&mut self, on: bool) {
        let value = if on { "1" } else { "0" };
        if let Err(e) = self.write_attr("brightness", value) {
            log::warn!("indicator write failed at {}: {e}", self.dir.display());
        }
    }
}
