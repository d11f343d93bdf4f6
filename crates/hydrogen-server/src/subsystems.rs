//! Lifecycle shells for the service subsystems.
//!
//! Each shell owns a shutdown flag and one worker thread spawned at
//! launch. The worker is a placeholder loop standing in for the service
//! proper; the lifecycle surface (readiness probe, init, shutdown flag,
//! bounded stop) is the real thing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use hydrogen_config::AppConfig;
use hydrogen_lifecycle::{
    LaunchReadiness, RegistryError, Subsystem, SubsystemError, SubsystemRegistry, WorkerHandle,
};

use crate::probes;

/// Poll cadence of the placeholder worker loops.
const WORKER_TICK: Duration = Duration::from_millis(50);

/// A service subsystem shell: a probe plus one governed worker thread.
struct ServiceShell {
    name: &'static str,
    probe: fn(&AppConfig) -> LaunchReadiness,
    shutdown: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ServiceShell {
    fn new(name: &'static str, probe: fn(&AppConfig) -> LaunchReadiness) -> Arc<Self> {
        Arc::new(Self {
            name,
            probe,
            shutdown: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        })
    }
}

impl Subsystem for ServiceShell {
    fn name(&self) -> &str {
        self.name
    }

    fn readiness(&self, config: &AppConfig) -> LaunchReadiness {
        (self.probe)(config)
    }

    fn init(&self) -> Result<(), SubsystemError> {
        self.shutdown.store(false, Ordering::SeqCst);
        let flag = Arc::clone(&self.shutdown);
        let name = self.name;
        let worker = std::thread::Builder::new()
            .name(format!("hydrogen-{name}"))
            .spawn(move || {
                debug!(subsystem = name, "worker started");
                while !flag.load(Ordering::SeqCst) {
                    std::thread::sleep(WORKER_TICK);
                }
                debug!(subsystem = name, "worker stopped");
            })
            .map_err(|e| SubsystemError::new(name, format!("failed to spawn worker: {e}")))?;
        *self.worker.lock() = Some(worker);
        Ok(())
    }

    fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

/// Worker-handle view of a shell, registered alongside it.
struct ShellHandle(Arc<ServiceShell>);

impl WorkerHandle for ShellHandle {
    fn signal_shutdown(&self) {
        self.0.shutdown.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        let mut guard = self.0.worker.lock();
        match guard.as_ref() {
            Some(worker) if worker.is_finished() => {
                if let Some(worker) = guard.take() {
                    let _ = worker.join();
                }
                true
            },
            Some(_) => false,
            None => true,
        }
    }
}

/// Register every service subsystem and its dependencies.
///
/// Declaration order is launch order (dependencies permitting) and its
/// reverse is the landing order.
pub(crate) fn register_all(registry: &Arc<SubsystemRegistry>) -> Result<(), RegistryError> {
    let register = |name: &'static str, probe: fn(&AppConfig) -> LaunchReadiness| {
        let shell = ServiceShell::new(name, probe);
        let handle = ShellHandle(Arc::clone(&shell));
        registry.register(shell, Some(Box::new(handle)))
    };

    let _webserver = register("webserver", probes::webserver)?;
    let websocket = register("websocket", probes::websocket)?;
    let terminal = register("terminal", probes::terminal)?;
    let _mdns_server = register("mdns-server", probes::mdns_server)?;
    let _mdns_client = register("mdns-client", probes::mdns_client)?;
    let _mail_relay = register("mail-relay", probes::mail_relay)?;
    let _print_queue = register("print-queue", probes::print_queue)?;
    let _oidc = register("oidc", probes::oidc)?;

    // The web-facing subsystems ride the HTTP server.
    registry.add_dependency(websocket, "webserver")?;
    registry.add_dependency(terminal, "webserver")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrogen_lifecycle::LifecycleController;

    #[test]
    fn test_register_all_declares_the_fleet() {
        let registry = Arc::new(SubsystemRegistry::new());
        register_all(&registry).unwrap();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.names()[0], "webserver");
        let terminal = registry.id_by_name("terminal").unwrap();
        assert_eq!(registry.dependency(terminal, 0).as_deref(), Some("webserver"));
    }

    #[test]
    fn test_default_config_launch_and_landing() {
        let registry = Arc::new(SubsystemRegistry::new());
        register_all(&registry).unwrap();

        let controller = LifecycleController::new(Arc::clone(&registry))
            .with_stop_wait(Duration::from_secs(2))
            .with_poll_interval(Duration::from_millis(10));

        let config = AppConfig::default();
        let results = controller.check_all_readiness(&config);
        let launched = controller.launch_ready(&results);
        // webserver, websocket, terminal, mdns-server, mdns-client.
        assert_eq!(launched, 5);
        assert!(registry.is_running_by_name("webserver"));
        assert!(registry.is_running_by_name("terminal"));
        assert!(!registry.is_running_by_name("print-queue"));

        controller.land_all();
        assert!(!registry.is_running_by_name("webserver"));
        assert!(!registry.is_running_by_name("terminal"));
    }
}
