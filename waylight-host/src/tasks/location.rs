//! Location reader task
//!
//! Sole caller of the GPS collaborator. Polls the receiver on a fixed
//! period and caches the latest fix; every other task reads the cache,
//! so a slow GPS read can never stall the tracker or arbiter cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use waylight_core::traits::location::{Fix, LocationSource};

/// Default GPS poll period
pub const LOCATION_PERIOD: Duration = Duration::from_millis(100);

/// The cached latest fix, `None` while the receiver has no signal
pub type SharedFix = Arc<Mutex<Option<Fix>>>;

/// Read the cached fix without blocking the writer
pub(crate) fn read_fix(cache: &SharedFix) -> Option<Fix> {
    cache.lock().ok().and_then(|guard| *guard)
}

/// Background GPS poller
pub struct LocationTask {
    cache: SharedFix,
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl LocationTask {
    /// Start polling `source` every `period`
    pub fn spawn(source: Arc<dyn LocationSource + Send + Sync>, period: Duration) -> Self {
        let cache: SharedFix = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));

        let thread_cache = Arc::clone(&cache);
        let thread_running = Arc::clone(&running);
        let thread = thread::spawn(move || {
            while thread_running.load(Ordering::Relaxed) {
                // Collaborator call first, lock second.
                let fix = source.current_fix();
                if let Ok(mut guard) = thread_cache.lock() {
                    *guard = fix;
                }
                thread::sleep(period);
            }
        });

        Self {
            cache,
            running,
            thread: Some(thread),
        }
    }

    /// Handle to the fix cache for the other tasks
    pub fn cache(&self) -> SharedFix {
        Arc::clone(&self.cache)
    }

    /// Latest fix, if the receiver currently has one
    pub fn fix(&self) -> Option<Fix> {
        read_fix(&self.cache)
    }

    /// Clear the running flag and join the thread
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LocationTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use waylight_core::geo::Coordinate;

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl LocationSource for CountingSource {
        fn current_fix(&self) -> Option<Fix> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(Fix {
                coord: Coordinate::new(49.0, -123.0),
                speed_kmh: 10.0,
            })
        }
    }

    #[test]
    fn caches_fixes_and_stops_within_a_period() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let mut task = LocationTask::spawn(source.clone(), Duration::from_millis(5));

        // Wait for at least one poll to land in the cache.
        for _ in 0..100 {
            if task.fix().is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(task.fix().is_some());

        task.stop();
        let calls_at_stop = source.calls.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        // No polling after join returned.
        assert_eq!(source.calls.load(Ordering::SeqCst), calls_at_stop);
    }
}
