//! Daemon assembly
//!
//! Wires the four polling tasks together around the shared aggregates
//! and the mailbox writer. The launcher owns process lifetime and the
//! privileged resources; this module owns task lifetime and shutdown
//! ordering.

use std::sync::Arc;
use std::time::Duration;

use waylight_core::arbiter::ParkMode;
use waylight_core::traits::accel::AccelerometerSource;
use waylight_core::traits::geocode::Geocoder;
use waylight_core::traits::location::{Fix, LocationSource};
use waylight_core::traits::speed::SpeedCompliance;
use waylight_core::trip::{TripConfig, TripSnapshot};
use waylight_hal::mem::SharedWindow;
use waylight_mailbox::StatusWriter;

use crate::error::HostError;
use crate::tasks::arbiter::{ArbiterTask, ARBITER_PERIOD};
use crate::tasks::location::{LocationTask, LOCATION_PERIOD};
use crate::tasks::parking::{ParkingSnapshot, ParkingTask, PARKING_PERIOD};
use crate::tasks::tracker::{TrackerTask, TRACKER_PERIOD};

pub use crate::tasks::arbiter::GpsIndicators;

/// The external collaborators the daemon polls
pub struct Services {
    /// GPS receiver wrapper
    pub location: Arc<dyn LocationSource + Send + Sync>,
    /// Address resolution backend
    pub geocoder: Arc<dyn Geocoder + Send + Sync>,
    /// Accelerometer wrapper
    pub accelerometer: Arc<dyn AccelerometerSource + Send + Sync>,
    /// Speed-compliance judgment
    pub speed: Arc<dyn SpeedCompliance + Send + Sync>,
}

/// Task periods and trip tuning
///
/// The defaults are the production cadence; tests shrink the periods to
/// keep wall-clock time down.
#[derive(Debug, Clone, Copy)]
pub struct DaemonConfig {
    /// Trip tracker tuning
    pub trip: TripConfig,
    /// GPS poll period
    pub location_period: Duration,
    /// Trip tick period
    pub tracker_period: Duration,
    /// Accelerometer poll period
    pub parking_period: Duration,
    /// Mailbox arbitration period
    pub arbiter_period: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            trip: TripConfig::default(),
            location_period: LOCATION_PERIOD,
            tracker_period: TRACKER_PERIOD,
            parking_period: PARKING_PERIOD,
            arbiter_period: ARBITER_PERIOD,
        }
    }
}

/// The running host half of the signaling subsystem
pub struct SignalingDaemon {
    location: LocationTask,
    tracker: TrackerTask,
    parking: Arc<ParkingTask>,
    arbiter: ArbiterTask,
}

impl SignalingDaemon {
    /// Start all tasks on their default periods
    pub fn start<W>(services: Services, window: W, indicators: GpsIndicators) -> Self
    where
        W: SharedWindow + Send + 'static,
    {
        Self::start_with_config(services, window, indicators, DaemonConfig::default())
    }

    /// Start all tasks with explicit periods
    pub fn start_with_config<W>(
        services: Services,
        window: W,
        indicators: GpsIndicators,
        config: DaemonConfig,
    ) -> Self
    where
        W: SharedWindow + Send + 'static,
    {
        let location = LocationTask::spawn(services.location, config.location_period);
        let tracker = TrackerTask::spawn(
            config.trip,
            location.cache(),
            services.geocoder,
            config.tracker_period,
        );
        let parking = Arc::new(ParkingTask::spawn(
            services.accelerometer,
            tracker.probe(),
            location.cache(),
            config.parking_period,
        ));
        let arbiter = ArbiterTask::spawn(
            StatusWriter::new(window),
            tracker.probe(),
            Arc::clone(&parking),
            services.speed,
            location.cache(),
            indicators,
            config.arbiter_period,
        );

        log::info!("signaling daemon started");
        Self {
            location,
            tracker,
            parking,
            arbiter,
        }
    }

    /// Resolve an address and start a trip toward it
    pub fn set_target(&self, address: &str) -> Result<(), HostError> {
        self.tracker.set_target(address)
    }

    /// Drop the current trip target
    pub fn reset_target(&self) {
        self.tracker.reset_target()
    }

    /// Operator input: switch the parking display
    pub fn select_park_mode(&self, mode: ParkMode) {
        self.parking.select_mode(mode)
    }

    /// Copy of the trip aggregate
    pub fn trip_snapshot(&self) -> TripSnapshot {
        self.tracker.snapshot()
    }

    /// Copy of the parking aggregate
    pub fn parking_snapshot(&self) -> ParkingSnapshot {
        self.parking.snapshot()
    }

    /// Latest cached GPS fix
    pub fn current_fix(&self) -> Option<Fix> {
        self.location.fix()
    }

    /// Stop every task and leave the disable sentinel in the mailbox
    ///
    /// The arbiter stops first; its thread writes the sentinel on exit
    /// and nothing else touches the mailbox afterward. The remaining
    /// loops observe their cleared flags within one poll period each.
    pub fn shutdown(mut self) {
        self.arbiter.stop();
        if let Some(parking) = Arc::get_mut(&mut self.parking) {
            parking.stop();
        }
        self.tracker.stop();
        self.location.stop();
        log::info!("signaling daemon stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;
    use waylight_core::geo::Coordinate;
    use waylight_core::orientation::AccelSample;
    use waylight_core::traits::geocode::GeocodeError;
    use waylight_core::trip::TripPhase;
    use waylight_hal::indicator::StatusIndicator;
    use waylight_hal::mem::RamWindow;
    use waylight_mailbox::{Mode, StatusReader, DISABLE_SENTINEL, MAILBOX_LEN};

    const START: Coordinate = Coordinate::new(49.2606, -122.9286);
    const TARGET: Coordinate = Coordinate::new(49.2827, -123.1207);

    /// Mailbox window the test keeps a handle on after the daemon takes it
    #[derive(Clone)]
    struct SharedRam(Arc<Mutex<RamWindow<MAILBOX_LEN>>>);

    impl SharedRam {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(RamWindow::new())))
        }
    }

    impl SharedWindow for SharedRam {
        fn load_u32(&self, offset: usize) -> u32 {
            self.0.lock().unwrap().load_u32(offset)
        }

        fn store_u32(&mut self, offset: usize, value: u32) {
            self.0.lock().unwrap().store_u32(offset, value)
        }

        fn len(&self) -> usize {
            MAILBOX_LEN
        }
    }

    struct ScriptedLocation {
        coord: Arc<Mutex<Option<Coordinate>>>,
        speed_kmh: f64,
    }

    impl LocationSource for ScriptedLocation {
        fn current_fix(&self) -> Option<Fix> {
            self.coord.lock().unwrap().map(|coord| Fix {
                coord,
                speed_kmh: self.speed_kmh,
            })
        }
    }

    struct FixedGeocoder(Result<Coordinate, GeocodeError>);

    impl Geocoder for FixedGeocoder {
        fn resolve(&self, _address: &str) -> Result<Coordinate, GeocodeError> {
            self.0
        }
    }

    struct LevelAccel;

    impl AccelerometerSource for LevelAccel {
        fn sample(&self) -> Option<AccelSample> {
            Some(AccelSample {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            })
        }
    }

    struct AlwaysGood;

    impl SpeedCompliance for AlwaysGood {
        fn color_class(&self) -> waylight_mailbox::ColorClass {
            waylight_mailbox::ColorClass::Good
        }
    }

    struct NullLed;

    impl StatusIndicator for NullLed {
        fn set_on(&mut self, _on: bool) {}
    }

    fn indicators() -> GpsIndicators {
        GpsIndicators {
            has_fix: Box::new(NullLed),
            no_fix: Box::new(NullLed),
        }
    }

    fn fast_config() -> DaemonConfig {
        DaemonConfig {
            trip: TripConfig {
                arrival_hold_ticks: 40,
                ..TripConfig::default()
            },
            location_period: Duration::from_millis(5),
            tracker_period: Duration::from_millis(5),
            parking_period: Duration::from_millis(5),
            arbiter_period: Duration::from_millis(5),
        }
    }

    fn wait_until(mut done: impl FnMut() -> bool) -> bool {
        for _ in 0..1000 {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        done()
    }

    #[test]
    fn full_trip_lifecycle_reaches_the_mailbox() {
        let _ = env_logger::builder().is_test(true).try_init();

        let coord = Arc::new(Mutex::new(Some(START)));
        let window = SharedRam::new();
        let mailbox = StatusReader::new(window.clone());

        let daemon = SignalingDaemon::start_with_config(
            Services {
                location: Arc::new(ScriptedLocation {
                    coord: Arc::clone(&coord),
                    speed_kmh: 0.5,
                }),
                geocoder: Arc::new(FixedGeocoder(Ok(TARGET))),
                accelerometer: Arc::new(LevelAccel),
                speed: Arc::new(AlwaysGood),
            },
            window,
            indicators(),
            fast_config(),
        );

        // Parked and slow: the handbrake reminder owns the string.
        assert!(wait_until(|| mailbox.mode() == Some(Mode::HandbrakeReminder)));
        assert!(wait_until(|| mailbox.gps_signal()));

        // Start a trip: travel mode takes over.
        assert!(wait_until(|| daemon.current_fix().is_some()));
        daemon.set_target("Valid Address").unwrap();
        assert_eq!(daemon.trip_snapshot().phase, TripPhase::EnRoute);
        assert!(wait_until(|| mailbox.mode() == Some(Mode::Travel)));

        // Drive to the destination: the bar fills, then the tracker
        // clears after the grace period and parking takes the string back.
        *coord.lock().unwrap() = Some(TARGET);
        assert!(wait_until(|| mailbox.progress() == 8));
        assert!(wait_until(|| daemon.trip_snapshot().phase == TripPhase::Idle));
        assert!(wait_until(|| mailbox.mode() != Some(Mode::Travel)));

        daemon.shutdown();
    }

    #[test]
    fn shutdown_leaves_the_disable_sentinel() {
        let window = SharedRam::new();
        let mailbox = StatusReader::new(window.clone());

        let daemon = SignalingDaemon::start_with_config(
            Services {
                location: Arc::new(ScriptedLocation {
                    coord: Arc::new(Mutex::new(Some(START))),
                    speed_kmh: 30.0,
                }),
                geocoder: Arc::new(FixedGeocoder(Ok(TARGET))),
                accelerometer: Arc::new(LevelAccel),
                speed: Arc::new(AlwaysGood),
            },
            window,
            indicators(),
            fast_config(),
        );

        assert!(wait_until(|| mailbox.mode().is_some()));
        daemon.shutdown();

        assert_eq!(mailbox.mode_word(), DISABLE_SENTINEL);
        assert_eq!(mailbox.mode(), None);
    }

    #[test]
    fn gps_loss_drops_the_signal_bit_but_not_the_trip() {
        let coord = Arc::new(Mutex::new(Some(START)));
        let window = SharedRam::new();
        let mailbox = StatusReader::new(window.clone());

        let daemon = SignalingDaemon::start_with_config(
            Services {
                location: Arc::new(ScriptedLocation {
                    coord: Arc::clone(&coord),
                    speed_kmh: 30.0,
                }),
                geocoder: Arc::new(FixedGeocoder(Ok(TARGET))),
                accelerometer: Arc::new(LevelAccel),
                speed: Arc::new(AlwaysGood),
            },
            window,
            indicators(),
            fast_config(),
        );

        assert!(wait_until(|| daemon.current_fix().is_some()));
        daemon.set_target("Valid Address").unwrap();
        assert!(wait_until(|| mailbox.mode() == Some(Mode::Travel)));

        // Kill the signal: the bit drops, the trip freezes en route.
        *coord.lock().unwrap() = None;
        assert!(wait_until(|| !mailbox.gps_signal()));
        assert_eq!(daemon.trip_snapshot().phase, TripPhase::EnRoute);
        assert!(wait_until(|| !daemon.trip_snapshot().fix_valid));

        daemon.shutdown();
    }
}
