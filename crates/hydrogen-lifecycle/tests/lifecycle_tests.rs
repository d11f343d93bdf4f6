//! Launch and landing scenarios driven through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use hydrogen_config::AppConfig;
use hydrogen_lifecycle::{
    LaunchReadiness, LifecycleController, Subsystem, SubsystemError, SubsystemRegistry,
    SubsystemState, ThreadHandle, WorkerHandle,
};

/// Records init/shutdown invocations in a shared ordered log.
struct Recording {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    ready: bool,
    fail_init: bool,
}

impl Recording {
    fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: Arc::clone(log),
            ready: true,
            fail_init: false,
        })
    }

    fn unready(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: Arc::clone(log),
            ready: false,
            fail_init: false,
        })
    }

    fn failing(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: Arc::clone(log),
            ready: true,
            fail_init: true,
        })
    }
}

impl Subsystem for Recording {
    fn name(&self) -> &str {
        &self.name
    }

    fn readiness(&self, _config: &AppConfig) -> LaunchReadiness {
        if self.ready {
            LaunchReadiness::ready(&self.name)
        } else {
            LaunchReadiness::not_ready(
                &self.name,
                vec![format!("{} disabled in configuration", self.name)],
            )
        }
    }

    fn init(&self) -> Result<(), SubsystemError> {
        self.log.lock().push(format!("init {}", self.name));
        if self.fail_init {
            Err(SubsystemError::new(&self.name, "listener failed to bind"))
        } else {
            Ok(())
        }
    }

    fn shutdown(&self) {
        self.log.lock().push(format!("shutdown {}", self.name));
    }
}

fn controller(registry: &Arc<SubsystemRegistry>) -> LifecycleController {
    LifecycleController::new(Arc::clone(registry))
        .with_stop_wait(Duration::from_millis(200))
        .with_poll_interval(Duration::from_millis(10))
}

fn launch_all(controller: &LifecycleController) -> usize {
    let results = controller.check_all_readiness(&AppConfig::default());
    controller.launch_ready(&results)
}

#[test]
fn test_dependency_cascade_stop_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    let a = registry.register(Recording::new("a", &log), None).unwrap();
    let b = registry.register(Recording::new("b", &log), None).unwrap();
    let c = registry.register(Recording::new("c", &log), None).unwrap();
    registry.add_dependency(b, "a").unwrap();
    registry.add_dependency(c, "b").unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 3);
    assert!(registry.is_running(a));
    assert!(registry.is_running(b));
    assert!(registry.is_running(c));

    log.lock().clear();
    assert!(controller.stop_with_dependents(a));

    let entries = log.lock().clone();
    assert_eq!(entries, vec!["shutdown c", "shutdown b", "shutdown a"]);
    assert_eq!(registry.state(a), SubsystemState::Inactive);
    assert_eq!(registry.state(b), SubsystemState::Inactive);
    assert_eq!(registry.state(c), SubsystemState::Inactive);
}

#[test]
fn test_launch_waits_for_dependencies_across_passes() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    // Dependents declared before their dependency: the first pass can only
    // start "base", later passes pick up the rest.
    let top = registry.register(Recording::new("top", &log), None).unwrap();
    let mid = registry.register(Recording::new("mid", &log), None).unwrap();
    let base = registry.register(Recording::new("base", &log), None).unwrap();
    registry.add_dependency(top, "mid").unwrap();
    registry.add_dependency(mid, "base").unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 3);

    let entries = log.lock().clone();
    assert_eq!(entries, vec!["init base", "init mid", "init top"]);
    assert!(registry.is_running(top));
    assert!(registry.is_running(mid));
    assert!(registry.is_running(base));
}

#[test]
fn test_unready_subsystem_stays_inactive_others_proceed() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    let up = registry.register(Recording::new("up", &log), None).unwrap();
    let down = registry.register(Recording::unready("down", &log), None).unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 1);
    assert!(registry.is_running(up));
    assert_eq!(registry.state(down), SubsystemState::Inactive);
}

#[test]
fn test_init_failure_starves_dependents_not_independents() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    let broken = registry.register(Recording::failing("broken", &log), None).unwrap();
    let leaning = registry.register(Recording::new("leaning", &log), None).unwrap();
    let solo = registry.register(Recording::new("solo", &log), None).unwrap();
    registry.add_dependency(leaning, "broken").unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 1);

    assert_eq!(registry.state(broken), SubsystemState::Error);
    assert_eq!(registry.state(leaning), SubsystemState::Inactive);
    assert!(registry.is_running(solo));
    // The dependent's init never ran.
    assert!(!log.lock().iter().any(|e| e == "init leaning"));
}

#[test]
fn test_landing_reverse_declaration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    for name in ["first", "second", "third"] {
        registry.register(Recording::new(name, &log), None).unwrap();
    }

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 3);
    log.lock().clear();

    controller.land_all();
    let entries = log.lock().clone();
    assert_eq!(entries, vec!["shutdown third", "shutdown second", "shutdown first"]);
    assert!(registry.ids().iter().all(|&id| !registry.is_running(id)));
}

#[test]
fn test_stop_inactive_target_is_noop_true() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());
    let id = registry.register(Recording::new("idle", &log), None).unwrap();

    let controller = controller(&registry);
    assert!(controller.stop_with_dependents(id));
    assert_eq!(registry.state(id), SubsystemState::Inactive);
    assert!(log.lock().is_empty());
}

#[test]
fn test_stop_stale_id_returns_false() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());
    let id = registry.register(Recording::new("gone", &log), None).unwrap();
    registry.clear();

    let controller = controller(&registry);
    assert!(!controller.stop_with_dependents(id));
}

/// A worker handle that never reports finished.
struct StuckHandle;

impl WorkerHandle for StuckHandle {
    fn signal_shutdown(&self) {}
    fn is_finished(&self) -> bool {
        false
    }
}

#[test]
fn test_shutdown_timeout_marks_error_and_walk_continues() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    let base = registry.register(Recording::new("base", &log), None).unwrap();
    let stuck = registry
        .register(Recording::new("stuck", &log), Some(Box::new(StuckHandle)))
        .unwrap();
    registry.add_dependency(stuck, "base").unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 2);

    // Stopping the base stops the stuck dependent first; its worker never
    // acknowledges, so it lands in Error while the base still stops.
    assert!(controller.stop_with_dependents(base));
    assert_eq!(registry.state(stuck), SubsystemState::Error);
    assert_eq!(registry.state(base), SubsystemState::Inactive);
}

#[test]
fn test_worker_thread_subsystem_full_cycle() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());

    let flag = Arc::new(AtomicBool::new(false));
    let worker_flag = Arc::clone(&flag);
    let worker = std::thread::spawn(move || {
        while !worker_flag.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(5));
        }
    });
    let handle = ThreadHandle::new(Arc::clone(&flag), worker);

    let id = registry
        .register(Recording::new("threaded", &log), Some(Box::new(handle)))
        .unwrap();

    let controller = LifecycleController::new(Arc::clone(&registry))
        .with_stop_wait(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(10));
    assert_eq!(launch_all(&controller), 1);
    assert!(registry.is_running(id));

    assert!(controller.stop_with_dependents(id));
    assert_eq!(registry.state(id), SubsystemState::Inactive);
    assert!(flag.load(Ordering::SeqCst), "shutdown flag was raised");
}

#[test]
fn test_relaunch_after_landing() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = Arc::new(SubsystemRegistry::new());
    let id = registry.register(Recording::new("phoenix", &log), None).unwrap();

    let controller = controller(&registry);
    assert_eq!(launch_all(&controller), 1);
    controller.land_all();
    assert_eq!(registry.state(id), SubsystemState::Inactive);

    // Inactive → Starting → Running is valid again after a clean landing.
    assert_eq!(launch_all(&controller), 1);
    assert!(registry.is_running(id));
}
