//! Onboard status indicator abstraction
//!
//! The host carries two single-color LEDs that report GPS-fix validity
//! independently of whatever the LED string is showing.

/// On/off status indicator
pub trait StatusIndicator {
    /// Turn the indicator on or off
    fn set_on(&mut self, on: bool);
}
