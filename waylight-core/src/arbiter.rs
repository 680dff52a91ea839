//! Status arbitration
//!
//! Merges the trip tracker, the parking classifier, and the external
//! speed-compliance signal into one mailbox update per tick. The rule is
//! simple and total: a running trip always wins the string; parking
//! sub-modes only exist while no trip is underway. The GPS indicator bit
//! rides along independently of the chosen mode.

use waylight_mailbox::{ColorClass, Mode, StatusUpdate, STRIP_LEN};

/// Operator-selectable parking display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParkMode {
    /// Sweep animation nagging about the handbrake
    HandbrakeReminder,
    /// Whole-string surface-quality readout
    FlatSurface,
}

impl ParkMode {
    /// The mailbox mode this parking display maps to
    pub const fn mode(self) -> Mode {
        match self {
            ParkMode::HandbrakeReminder => Mode::HandbrakeReminder,
            ParkMode::FlatSurface => Mode::FlatSurface,
        }
    }
}

/// Everything the arbiter looks at on one tick
#[derive(Debug, Clone, Copy)]
pub struct ArbiterInputs {
    /// Trip tracker underway (parking is the complement of this)
    pub trip_running: bool,
    /// Trip progress, 0..=100
    pub progress_pct: f64,
    /// Parking display the operator selected
    pub park_mode: ParkMode,
    /// Latest surface-quality class
    pub surface: ColorClass,
    /// Latest speed-compliance class
    pub speed: ColorClass,
    /// GPS fix validity
    pub gps_fix_valid: bool,
}

/// Scale a progress percentage to a lit-LED count
///
/// The mailbox carries the pre-scaled count so the co-processor never
/// needs to know the percentage encoding. 100 % lights the whole string.
pub fn progress_to_lit_leds(pct: f64) -> u32 {
    let pct = pct.clamp(0.0, 100.0);
    (pct * STRIP_LEN as f64 / 100.0) as u32
}

/// Produce the mailbox fields for one tick
pub fn arbitrate(inputs: &ArbiterInputs) -> StatusUpdate {
    if inputs.trip_running {
        StatusUpdate {
            mode: Mode::Travel.as_word(),
            progress: progress_to_lit_leds(inputs.progress_pct),
            color: inputs.speed.as_word(),
            gps_signal: inputs.gps_fix_valid,
        }
    } else {
        StatusUpdate {
            mode: inputs.park_mode.mode().as_word(),
            progress: 0,
            color: inputs.surface.as_word(),
            gps_signal: inputs.gps_fix_valid,
        }
    }
}
