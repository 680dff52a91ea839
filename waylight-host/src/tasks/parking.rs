//! Parking classifier task
//!
//! Active exactly while no trip is underway. Feeds accelerometer
//! samples through the hysteresis classifier and tracks which parking
//! display the operator selected. On the transition into parking the
//! sub-mode defaults to the handbrake reminder when the vehicle rolled
//! in slowly (or GPS speed is unknown), otherwise to the flat-surface
//! readout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use waylight_core::arbiter::ParkMode;
use waylight_core::orientation::SurfaceClassifier;
use waylight_core::traits::accel::AccelerometerSource;
use waylight_mailbox::ColorClass;

use crate::tasks::location::{read_fix, SharedFix};
use crate::tasks::tracker::TripProbe;

/// Default accelerometer poll period
pub const PARKING_PERIOD: Duration = Duration::from_millis(100);

/// Below this speed at parking time the handbrake reminder comes up first
pub const HANDBRAKE_DEFAULT_SPEED_KMH: f64 = 2.0;

/// The parking aggregate; one lock guards both fields
#[derive(Debug)]
struct ParkingState {
    surface: ColorClass,
    park_mode: ParkMode,
}

/// Copy of the parking aggregate at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkingSnapshot {
    /// Latest surface-quality class
    pub surface: ColorClass,
    /// Currently selected parking display
    pub park_mode: ParkMode,
}

/// Background parking classifier
pub struct ParkingTask {
    state: Arc<Mutex<ParkingState>>,
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ParkingTask {
    /// Start classifying every `period` while parking is active
    pub fn spawn(
        accel: Arc<dyn AccelerometerSource + Send + Sync>,
        trip: TripProbe,
        fix: SharedFix,
        period: Duration,
    ) -> Self {
        let state = Arc::new(Mutex::new(ParkingState {
            surface: ColorClass::Good,
            park_mode: ParkMode::FlatSurface,
        }));
        let running = Arc::new(AtomicBool::new(true));

        let thread_state = Arc::clone(&state);
        let thread_running = Arc::clone(&running);
        let thread = thread::spawn(move || {
            // The classifier's hysteresis memory lives on this thread;
            // the shared aggregate only carries its latest output.
            let mut classifier = SurfaceClassifier::new();
            let mut was_parking = false;

            while thread_running.load(Ordering::Relaxed) {
                let parking = !trip.snapshot().running();

                if parking {
                    if !was_parking {
                        let slow = read_fix(&fix)
                            .map(|f| f.speed_kmh < HANDBRAKE_DEFAULT_SPEED_KMH)
                            .unwrap_or(true);
                        let default_mode = if slow {
                            ParkMode::HandbrakeReminder
                        } else {
                            ParkMode::FlatSurface
                        };
                        if let Ok(mut guard) = thread_state.lock() {
                            guard.park_mode = default_mode;
                        }
                        log::debug!("parking active, default display {default_mode:?}");
                    }

                    // Sensor silence keeps the last class; never a crash.
                    if let Some(sample) = accel.sample() {
                        let class = classifier.update(sample);
                        if let Ok(mut guard) = thread_state.lock() {
                            guard.surface = class;
                        }
                    }
                }

                was_parking = parking;
                thread::sleep(period);
            }
        });

        Self {
            state,
            running,
            thread: Some(thread),
        }
    }

    /// Operator input: switch the parking display
    pub fn select_mode(&self, mode: ParkMode) {
        if let Ok(mut guard) = self.state.lock() {
            guard.park_mode = mode;
        }
    }

    /// Copy of the parking aggregate
    pub fn snapshot(&self) -> ParkingSnapshot {
        match self.state.lock() {
            Ok(guard) => ParkingSnapshot {
                surface: guard.surface,
                park_mode: guard.park_mode,
            },
            Err(poisoned) => {
                let guard = poisoned.into_inner();
                ParkingSnapshot {
                    surface: guard.surface,
                    park_mode: guard.park_mode,
                }
            }
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

impl Drop for ParkingTask {
    fn drop(&mut self) {
        self.stop();
    }
}
