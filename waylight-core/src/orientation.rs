//! Parking-orientation classifier
//!
//! Grades how level the vehicle sits from accelerometer samples. The
//! classifier is a hysteresis state machine: entering a worse class takes
//! a larger tilt than leaving it, so a car parked right on a boundary
//! does not flicker between colors.
//!
//! Consulted only while parking is active (no trip running).

use waylight_mailbox::ColorClass;

/// Tilt above this on either horizontal axis enters `Bad`
pub const ENTER_BAD_TILT_G: f32 = 0.15;
/// Tilt must fall below this on both horizontal axes to leave `Bad`
pub const EXIT_BAD_TILT_G: f32 = 0.12;
/// `Bad` also triggers when gravity leaves this window
pub const ENTER_BAD_Z_MIN_G: f32 = 0.95;
/// Upper bound of the enter-bad gravity window
pub const ENTER_BAD_Z_MAX_G: f32 = 1.05;
/// Leaving `Bad` needs gravity back inside this tighter window
pub const EXIT_BAD_Z_MIN_G: f32 = 0.98;
/// Upper bound of the exit-bad gravity window
pub const EXIT_BAD_Z_MAX_G: f32 = 1.02;
/// Tilt above this on either horizontal axis enters `Decent`
pub const ENTER_DECENT_TILT_G: f32 = 0.07;
/// Tilt must fall below this on both horizontal axes to leave `Decent`
pub const EXIT_DECENT_TILT_G: f32 = 0.05;

/// One accelerometer sample in g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    /// Lateral axis
    pub x: f32,
    /// Longitudinal axis
    pub y: f32,
    /// Vertical axis (≈1.0 when level)
    pub z: f32,
}

fn enters_bad(s: AccelSample) -> bool {
    s.x.abs() > ENTER_BAD_TILT_G
        || s.y.abs() > ENTER_BAD_TILT_G
        || s.z < ENTER_BAD_Z_MIN_G
        || s.z > ENTER_BAD_Z_MAX_G
}

fn exits_bad(s: AccelSample) -> bool {
    s.x.abs() < EXIT_BAD_TILT_G
        && s.y.abs() < EXIT_BAD_TILT_G
        && s.z > EXIT_BAD_Z_MIN_G
        && s.z < EXIT_BAD_Z_MAX_G
}

fn enters_decent(s: AccelSample) -> bool {
    s.x.abs() > ENTER_DECENT_TILT_G || s.y.abs() > ENTER_DECENT_TILT_G
}

fn exits_decent(s: AccelSample) -> bool {
    s.x.abs() < EXIT_DECENT_TILT_G && s.y.abs() < EXIT_DECENT_TILT_G
}

/// Surface-quality classifier with hysteresis memory
///
/// Starts at `Good`; the enter thresholds pull it down as soon as the
/// first tilted sample arrives.
#[derive(Debug, Clone)]
pub struct SurfaceClassifier {
    class: ColorClass,
}

impl Default for SurfaceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceClassifier {
    /// Create a classifier in the `Good` state
    pub fn new() -> Self {
        Self {
            class: ColorClass::Good,
        }
    }

    /// The current class without consuming a sample
    pub fn class(&self) -> ColorClass {
        self.class
    }

    /// Feed one sample and return the updated class
    ///
    /// A `Bad` reading can only improve one step at a time: a sample that
    /// clears the exit-bad window lands in `Decent`, never directly in
    /// `Good`.
    pub fn update(&mut self, sample: AccelSample) -> ColorClass {
        self.class = Self::transition(self.class, sample);
        self.class
    }

    fn transition(prev: ColorClass, s: AccelSample) -> ColorClass {
        if prev == ColorClass::Bad && exits_bad(s) {
            return ColorClass::Decent;
        }
        if enters_bad(s) {
            return ColorClass::Bad;
        }
        if prev == ColorClass::Decent && exits_decent(s) {
            return ColorClass::Good;
        }
        if enters_decent(s) {
            return ColorClass::Decent;
        }
        ColorClass::Good
    }
}
