//! The capability traits subsystems implement.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use parking_lot::Mutex;

use hydrogen_config::AppConfig;

use crate::error::SubsystemError;
use crate::readiness::LaunchReadiness;

/// Lifecycle state of a registered subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemState {
    /// Registered but not launched (also the post-landing state).
    Inactive,
    /// `init` is running.
    Starting,
    /// Launched and serving.
    Running,
    /// `shutdown` is running.
    Stopping,
    /// `init` failed or shutdown overran its bounded wait. Only a full
    /// registry reset recycles an `Error` entry.
    Error,
}

impl SubsystemState {
    /// Static label for the state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Stopping => "Stopping",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for SubsystemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component with a lifecycle, registered with the registry.
///
/// The registry is the single source of truth for lifecycle *state*; the
/// trait carries only the operations the controller invokes. `init` and
/// `shutdown` may block for bounded time and always run with the registry
/// lock released.
pub trait Subsystem: Send + Sync {
    /// Unique, non-empty subsystem name.
    fn name(&self) -> &str;

    /// Decide whether configuration and environment permit a launch.
    ///
    /// A ready result carries one header message naming the subsystem; an
    /// unready result carries diagnostics. Never mutates anything.
    fn readiness(&self, config: &AppConfig) -> LaunchReadiness;

    /// Bring the subsystem up. Called in `Starting` state.
    ///
    /// # Errors
    ///
    /// A returned error moves the entry to `Error` and starves dependents.
    fn init(&self) -> Result<(), SubsystemError>;

    /// Take the subsystem down. Called in `Stopping` state, after the
    /// shutdown flag has been raised.
    fn shutdown(&self);
}

/// Control handle a subsystem hands the registry at registration.
///
/// The registry never inspects the handle beyond these two capabilities;
/// a subsystem without worker threads registers no handle at all.
pub trait WorkerHandle: Send + Sync {
    /// Ask the worker to stop, without blocking.
    fn signal_shutdown(&self);

    /// Whether the worker has fully stopped. Polled with a bounded wait
    /// during the stop sequence.
    fn is_finished(&self) -> bool;
}

/// The common worker shape: a shutdown flag plus one worker thread.
pub struct ThreadHandle {
    shutdown: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ThreadHandle {
    /// Wrap a shutdown flag and the worker thread it governs.
    #[must_use]
    pub fn new(shutdown: Arc<AtomicBool>, worker: JoinHandle<()>) -> Self {
        Self {
            shutdown,
            worker: Mutex::new(Some(worker)),
        }
    }
}

impl WorkerHandle for ThreadHandle {
    fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        let mut guard = self.worker.lock();
        match guard.as_ref() {
            Some(handle) if handle.is_finished() => {
                // Reap the thread so a finished worker is also joined.
                if let Some(handle) = guard.take() {
                    let _ = handle.join();
                }
                true
            },
            Some(_) => false,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_state_labels() {
        assert_eq!(SubsystemState::Inactive.as_str(), "Inactive");
        assert_eq!(SubsystemState::Starting.as_str(), "Starting");
        assert_eq!(SubsystemState::Running.as_str(), "Running");
        assert_eq!(SubsystemState::Stopping.as_str(), "Stopping");
        assert_eq!(SubsystemState::Error.as_str(), "Error");
    }

    #[test]
    fn test_thread_handle_signals_and_finishes() {
        let flag = Arc::new(AtomicBool::new(false));
        let worker_flag = Arc::clone(&flag);
        let worker = std::thread::spawn(move || {
            while !worker_flag.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(5));
            }
        });

        let handle = ThreadHandle::new(Arc::clone(&flag), worker);
        assert!(!handle.is_finished());

        handle.signal_shutdown();
        let started = std::time::Instant::now();
        while !handle.is_finished() {
            assert!(started.elapsed() < Duration::from_secs(2), "worker never stopped");
            std::thread::sleep(Duration::from_millis(5));
        }
        // Finished stays finished once the thread is reaped.
        assert!(handle.is_finished());
    }
}
