//! Trip tracker task
//!
//! Owns the [`TripTracker`] aggregate behind a single mutex and ticks it
//! from the cached GPS fix. The whole aggregate lives under one lock so
//! readers never see a target from one tick combined with progress from
//! another; getters hand out copies and never block the tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use waylight_core::traits::geocode::Geocoder;
use waylight_core::trip::{TripConfig, TripSnapshot, TripTracker};

use crate::error::HostError;
use crate::tasks::location::{read_fix, SharedFix};

/// Default trip tick period
pub const TRACKER_PERIOD: Duration = Duration::from_millis(250);

/// Read-only handle to the trip aggregate
///
/// Hands out snapshots only; holders cannot keep the aggregate locked.
#[derive(Clone)]
pub struct TripProbe {
    trip: Arc<Mutex<TripTracker>>,
}

impl TripProbe {
    /// Copy of the aggregate at the latest tick
    pub fn snapshot(&self) -> TripSnapshot {
        match self.trip.lock() {
            Ok(guard) => guard.snapshot(),
            // A poisoned aggregate reads as idle; the daemon is on its
            // way down at that point anyway.
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }
}

/// Background trip progress tracker
pub struct TrackerTask {
    trip: Arc<Mutex<TripTracker>>,
    fix: SharedFix,
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TrackerTask {
    /// Start ticking a fresh tracker every `period`
    pub fn spawn(
        config: TripConfig,
        fix: SharedFix,
        geocoder: Arc<dyn Geocoder + Send + Sync>,
        period: Duration,
    ) -> Self {
        let trip = Arc::new(Mutex::new(TripTracker::new(config)));
        let running = Arc::new(AtomicBool::new(true));

        let thread_trip = Arc::clone(&trip);
        let thread_fix = Arc::clone(&fix);
        let thread_running = Arc::clone(&running);
        let thread = thread::spawn(move || {
            while thread_running.load(Ordering::Relaxed) {
                let fix = read_fix(&thread_fix);
                if let Ok(mut guard) = thread_trip.lock() {
                    guard.tick(fix);
                }
                thread::sleep(period);
            }
        });

        Self {
            trip,
            fix,
            geocoder,
            running,
            thread: Some(thread),
        }
    }

    /// Resolve `address` and start a trip toward it
    ///
    /// The geocoding call and the fix read both happen before the trip
    /// lock is taken. Any failure leaves the tracker untouched.
    pub fn set_target(&self, address: &str) -> Result<(), HostError> {
        let target = self.geocoder.resolve(address)?;
        let fix = read_fix(&self.fix).ok_or(HostError::NoFix)?;

        if let Ok(mut guard) = self.trip.lock() {
            guard.begin(fix.coord, target)?;
            log::info!(
                "trip started toward ({:.6}, {:.6}), baseline {:.2} km",
                target.lat_deg,
                target.lon_deg,
                guard.snapshot().baseline_km
            );
        }
        Ok(())
    }

    /// Drop the current target unconditionally
    pub fn reset_target(&self) {
        if let Ok(mut guard) = self.trip.lock() {
            guard.reset();
            log::info!("trip target cleared");
        }
    }

    /// Copy of the trip aggregate
    pub fn snapshot(&self) -> TripSnapshot {
        self.probe().snapshot()
    }

    /// Read-only handle for the other tasks
    pub fn probe(&self) -> TripProbe {
        TripProbe {
            trip: Arc::clone(&self.trip),
        }
    }

    /// Clear the running flag and join the thread
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TrackerTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waylight_core::geo::Coordinate;
    use waylight_core::traits::geocode::GeocodeError;
    use waylight_core::traits::location::Fix;
    use waylight_core::trip::TripPhase;

    const TARGET: Coordinate = Coordinate::new(49.2827, -123.1207);
    const START: Coordinate = Coordinate::new(49.2606, -122.9286);

    struct FixedGeocoder(Result<Coordinate, GeocodeError>);

    impl Geocoder for FixedGeocoder {
        fn resolve(&self, _address: &str) -> Result<Coordinate, GeocodeError> {
            self.0
        }
    }

    fn fix_cache(coord: Option<Coordinate>) -> SharedFix {
        Arc::new(Mutex::new(coord.map(|coord| Fix {
            coord,
            speed_kmh: 30.0,
        })))
    }

    fn short_period() -> Duration {
        Duration::from_millis(5)
    }

    #[test]
    fn set_target_starts_a_trip() {
        let mut task = TrackerTask::spawn(
            TripConfig::default(),
            fix_cache(Some(START)),
            Arc::new(FixedGeocoder(Ok(TARGET))),
            short_period(),
        );

        task.set_target("Valid Address").unwrap();
        let snap = task.snapshot();
        assert_eq!(snap.phase, TripPhase::EnRoute);
        assert!(snap.baseline_km > 0.0);
        task.stop();
    }

    #[test]
    fn set_target_without_a_fix_mutates_nothing() {
        let mut task = TrackerTask::spawn(
            TripConfig::default(),
            fix_cache(None),
            Arc::new(FixedGeocoder(Ok(TARGET))),
            short_period(),
        );

        assert_eq!(task.set_target("anywhere"), Err(HostError::NoFix));
        let snap = task.snapshot();
        assert_eq!(snap.phase, TripPhase::Idle);
        assert_eq!(snap.target, None);
        task.stop();
    }

    #[test]
    fn geocode_failure_keeps_the_tracker_idle() {
        let mut task = TrackerTask::spawn(
            TripConfig::default(),
            fix_cache(Some(START)),
            Arc::new(FixedGeocoder(Err(GeocodeError::NoMatch))),
            short_period(),
        );

        assert_eq!(
            task.set_target("nowhere"),
            Err(HostError::Geocode(GeocodeError::NoMatch))
        );
        assert_eq!(task.snapshot().phase, TripPhase::Idle);
        task.stop();
    }

    #[test]
    fn ticks_drive_progress_from_the_cached_fix() {
        let cache = fix_cache(Some(START));
        let mut task = TrackerTask::spawn(
            TripConfig::default(),
            Arc::clone(&cache),
            Arc::new(FixedGeocoder(Ok(TARGET))),
            short_period(),
        );

        task.set_target("Valid Address").unwrap();

        // Move the vehicle most of the way there.
        let near = Coordinate::new(
            START.lat_deg + (TARGET.lat_deg - START.lat_deg) * 0.9,
            START.lon_deg + (TARGET.lon_deg - START.lon_deg) * 0.9,
        );
        if let Ok(mut guard) = cache.lock() {
            *guard = Some(Fix {
                coord: near,
                speed_kmh: 30.0,
            });
        }

        let mut progressed = false;
        for _ in 0..100 {
            if task.snapshot().progress_pct > 80.0 {
                progressed = true;
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(progressed, "tracker never consumed the cached fix");
        task.stop();
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut task = TrackerTask::spawn(
            TripConfig::default(),
            fix_cache(Some(START)),
            Arc::new(FixedGeocoder(Ok(TARGET))),
            short_period(),
        );
        task.set_target("Valid Address").unwrap();
        task.reset_target();
        assert_eq!(task.snapshot().phase, TripPhase::Idle);
        task.stop();
    }
}
