//! Trip progress tracker
//!
//! Tracks percent-progress toward a geocoded destination from live GPS
//! fixes. The tracker is a pure state machine ticked by the host runtime;
//! all fields form one aggregate so readers always see a consistent
//! combination of target, baseline, and progress.
//!
//! Phases: `Idle → EnRoute → Arrived → Idle`. Arrival holds the display
//! for a grace period before clearing, so the full progress bar is
//! visible for a moment at the destination.

use crate::geo::{haversine_km, Coordinate};
use crate::traits::location::Fix;

/// Distance at which the trip counts as arrived
pub const DEFAULT_ARRIVAL_THRESHOLD_KM: f64 = 0.25;

/// Ticks the `Arrived` display holds before clearing (5 s at a 250 ms tick)
pub const DEFAULT_ARRIVAL_HOLD_TICKS: u32 = 20;

/// Where the tracker is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TripPhase {
    /// No target set
    Idle,
    /// Target set, progress updating from fixes
    EnRoute,
    /// Destination reached, holding the display grace period
    Arrived,
}

/// Reasons a trip cannot start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TripError {
    /// Current fix missing or out of range
    InvalidSource,
    /// Resolved target out of range
    InvalidTarget,
}

impl core::fmt::Display for TripError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TripError::InvalidSource => write!(f, "current position unknown or invalid"),
            TripError::InvalidTarget => write!(f, "target coordinate invalid"),
        }
    }
}

/// Copy of the whole trip aggregate at one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripSnapshot {
    /// Current phase
    pub phase: TripPhase,
    /// Destination, when set
    pub target: Option<Coordinate>,
    /// Position snapshot taken when the target was set
    pub source: Option<Coordinate>,
    /// Distance from source to target at set time, km
    pub baseline_km: f64,
    /// Latest distance to target, km
    pub distance_km: f64,
    /// Progress toward the target, 0..=100
    pub progress_pct: f64,
    /// False while progress is frozen on GPS loss
    pub fix_valid: bool,
}

impl TripSnapshot {
    /// True while a trip is underway (parking logic keys off this)
    pub fn running(&self) -> bool {
        self.phase != TripPhase::Idle
    }
}

/// Tuning knobs for the tracker
#[derive(Debug, Clone, Copy)]
pub struct TripConfig {
    /// Distance at which the trip counts as arrived, km
    pub arrival_threshold_km: f64,
    /// Ticks to hold the `Arrived` display before clearing
    pub arrival_hold_ticks: u32,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            arrival_threshold_km: DEFAULT_ARRIVAL_THRESHOLD_KM,
            arrival_hold_ticks: DEFAULT_ARRIVAL_HOLD_TICKS,
        }
    }
}

/// Trip progress state machine
///
/// Owned exclusively by the host's tracker task; everyone else reads
/// copies via [`TripTracker::snapshot`].
#[derive(Debug, Clone)]
pub struct TripTracker {
    config: TripConfig,
    phase: TripPhase,
    target: Option<Coordinate>,
    source: Option<Coordinate>,
    baseline_km: f64,
    distance_km: f64,
    progress_pct: f64,
    fix_valid: bool,
    hold_ticks_left: u32,
}

impl Default for TripTracker {
    fn default() -> Self {
        Self::new(TripConfig::default())
    }
}

impl TripTracker {
    /// Create an idle tracker
    pub fn new(config: TripConfig) -> Self {
        Self {
            config,
            phase: TripPhase::Idle,
            target: None,
            source: None,
            baseline_km: 0.0,
            distance_km: 0.0,
            progress_pct: 0.0,
            fix_valid: false,
            hold_ticks_left: 0,
        }
    }

    /// True while a trip is underway
    pub fn running(&self) -> bool {
        self.phase != TripPhase::Idle
    }

    /// Start a trip from `source` toward `target`
    ///
    /// Fails without touching any state when either coordinate is
    /// invalid. A target already inside the arrival threshold goes
    /// straight to `Arrived`.
    pub fn begin(&mut self, source: Coordinate, target: Coordinate) -> Result<(), TripError> {
        if !source.is_valid() {
            return Err(TripError::InvalidSource);
        }
        if !target.is_valid() {
            return Err(TripError::InvalidTarget);
        }

        let baseline = haversine_km(source, target);
        self.target = Some(target);
        self.source = Some(source);
        self.baseline_km = baseline;
        self.distance_km = baseline;
        self.fix_valid = true;

        if baseline <= self.config.arrival_threshold_km {
            self.arrive();
        } else {
            self.phase = TripPhase::EnRoute;
            self.progress_pct = 0.0;
        }
        Ok(())
    }

    /// Advance one tick with the latest fix, if any
    ///
    /// An absent or invalid fix freezes the aggregate: distance and
    /// progress keep their last values and only `fix_valid` drops. The
    /// `Arrived` grace period counts down regardless of fixes.
    pub fn tick(&mut self, fix: Option<Fix>) {
        let fix = fix.filter(|f| f.coord.is_valid());
        self.fix_valid = fix.is_some();

        match self.phase {
            TripPhase::Idle => {}
            TripPhase::EnRoute => {
                let Some(fix) = fix else {
                    return; // freeze
                };
                let Some(target) = self.target else {
                    return;
                };
                let distance = haversine_km(fix.coord, target);
                self.distance_km = distance;
                if distance <= self.config.arrival_threshold_km {
                    self.arrive();
                } else if self.baseline_km > 0.0 {
                    let pct = (self.baseline_km - distance) / self.baseline_km * 100.0;
                    self.progress_pct = pct.clamp(0.0, 100.0);
                }
            }
            TripPhase::Arrived => {
                self.hold_ticks_left = self.hold_ticks_left.saturating_sub(1);
                if self.hold_ticks_left == 0 {
                    self.clear();
                }
            }
        }
    }

    /// Unconditionally clear the trip and return to `Idle`
    pub fn reset(&mut self) {
        self.clear();
    }

    /// Copy of the whole aggregate
    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            phase: self.phase,
            target: self.target,
            source: self.source,
            baseline_km: self.baseline_km,
            distance_km: self.distance_km,
            progress_pct: self.progress_pct,
            fix_valid: self.fix_valid,
        }
    }

    fn arrive(&mut self) {
        self.phase = TripPhase::Arrived;
        self.progress_pct = 100.0;
        self.hold_ticks_left = self.config.arrival_hold_ticks;
    }

    fn clear(&mut self) {
        self.phase = TripPhase::Idle;
        self.target = None;
        self.source = None;
        self.baseline_km = 0.0;
        self.distance_km = 0.0;
        self.progress_pct = 0.0;
        self.hold_ticks_left = 0;
    }
}
