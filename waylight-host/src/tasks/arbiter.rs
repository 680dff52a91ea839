//! Status arbiter task
//!
//! Once a second: snapshot the trip and parking aggregates, ask the
//! speed-compliance collaborator for its class, merge everything into
//! one mailbox update, and mirror fix validity onto the two onboard
//! indicator LEDs. Mailbox writes are fire-and-forget; if the
//! co-processor is unpowered they land in memory with no effect, which
//! is fine for an advisory link.
//!
//! When the task stops it writes the disabling mode sentinel as its last
//! act, so the co-processor blanks the string after the host goes away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use waylight_core::arbiter::{arbitrate, ArbiterInputs};
use waylight_core::traits::speed::SpeedCompliance;
use waylight_hal::indicator::StatusIndicator;
use waylight_hal::mem::SharedWindow;
use waylight_mailbox::StatusWriter;

use crate::tasks::location::{read_fix, SharedFix};
use crate::tasks::parking::ParkingTask;
use crate::tasks::tracker::TripProbe;

/// Default arbitration period
pub const ARBITER_PERIOD: Duration = Duration::from_secs(1);

/// The two onboard fix-validity LEDs
pub struct GpsIndicators {
    /// Lit while the receiver has a fix
    pub has_fix: Box<dyn StatusIndicator + Send>,
    /// Lit while it does not
    pub no_fix: Box<dyn StatusIndicator + Send>,
}

/// Background status arbiter
pub struct ArbiterTask {
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ArbiterTask {
    /// Start arbitrating every `period`
    ///
    /// Takes ownership of the mailbox writer and the indicators; they
    /// live on the arbiter thread for the rest of the run.
    pub fn spawn<W>(
        mut writer: StatusWriter<W>,
        trip: TripProbe,
        parking: Arc<ParkingTask>,
        speed: Arc<dyn SpeedCompliance + Send + Sync>,
        fix: SharedFix,
        mut indicators: GpsIndicators,
        period: Duration,
    ) -> Self
    where
        W: SharedWindow + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));

        let thread_running = Arc::clone(&running);
        let thread = thread::spawn(move || {
            while thread_running.load(Ordering::Relaxed) {
                let trip_snap = trip.snapshot();
                let park_snap = parking.snapshot();
                let gps_fix_valid = read_fix(&fix).is_some();
                // Collaborator call with no lock held.
                let speed_class = speed.color_class();

                let update = arbitrate(&ArbiterInputs {
                    trip_running: trip_snap.running(),
                    progress_pct: trip_snap.progress_pct,
                    park_mode: park_snap.park_mode,
                    surface: park_snap.surface,
                    speed: speed_class,
                    gps_fix_valid,
                });

                writer.write(&update);
                indicators.has_fix.set_on(gps_fix_valid);
                indicators.no_fix.set_on(!gps_fix_valid);

                thread::sleep(period);
            }

            // Last write wins: tell the co-processor to blank the string.
            writer.disable();
        });

        Self {
            running,
            thread: Some(thread),
        }
    }

    /// Clear the running flag, join, and leave the sentinel behind
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ArbiterTask {
    fn drop(&mut self) {
        self.stop();
    }
}
