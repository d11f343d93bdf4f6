//! The launch/landing controller.
//!
//! Launch runs repeated passes over the registry in declaration order:
//! each pass starts every subsystem that is ready and whose declared
//! dependencies are all `Running`, and the passes stop when one starts
//! nothing. Landing walks the reverse order, stopping the transitive
//! dependents of each subsystem before the subsystem itself.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use hydrogen_config::AppConfig;

use crate::readiness::LaunchReadiness;
use crate::registry::{SubsystemId, SubsystemRegistry};
use crate::subsystem::SubsystemState;

/// Default bounded wait for a stopping subsystem's worker.
const DEFAULT_STOP_WAIT: Duration = Duration::from_secs(5);

/// Poll interval while waiting on a stopping worker.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Drives registered subsystems through launch and landing.
pub struct LifecycleController {
    registry: Arc<SubsystemRegistry>,
    stop_wait: Duration,
    poll_interval: Duration,
}

impl LifecycleController {
    /// Create a controller over the shared registry handle.
    #[must_use]
    pub fn new(registry: Arc<SubsystemRegistry>) -> Self {
        Self {
            registry,
            stop_wait: DEFAULT_STOP_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the bounded wait applied to each stopping subsystem.
    #[must_use]
    pub fn with_stop_wait(mut self, stop_wait: Duration) -> Self {
        self.stop_wait = stop_wait;
        self
    }

    /// Override the poll interval used while waiting on stopping workers.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The registry this controller drives.
    #[must_use]
    pub fn registry(&self) -> &Arc<SubsystemRegistry> {
        &self.registry
    }

    /// Run every subsystem's readiness probe, in declaration order.
    ///
    /// Never short-circuits: every probe runs and every decision is
    /// returned, so one unready subsystem cannot hide another's
    /// diagnostics.
    #[must_use]
    pub fn check_all_readiness(&self, config: &AppConfig) -> Vec<LaunchReadiness> {
        let mut results = Vec::new();
        for id in self.registry.ids() {
            let Some(subsystem) = self.registry.subsystem(id) else {
                continue;
            };
            let decision = subsystem.readiness(config);
            if decision.ready {
                for message in &decision.messages {
                    info!(target: "launch", "{message}");
                }
            } else {
                for message in &decision.messages {
                    warn!(target: "launch", "{message}");
                }
            }
            results.push(decision);
        }
        results
    }

    /// Launch every ready subsystem whose dependencies are `Running`.
    ///
    /// Runs repeated passes in declaration order until a pass launches
    /// nothing; returns the total number launched. A failed `init` moves
    /// the entry to `Error`, which starves its dependents on later passes.
    pub fn launch_ready(&self, results: &[LaunchReadiness]) -> usize {
        let ready: HashSet<&str> = results
            .iter()
            .filter(|r| r.ready)
            .map(|r| r.subsystem.as_str())
            .collect();

        let mut total: usize = 0;
        loop {
            let mut launched_this_pass: usize = 0;
            for id in self.registry.ids() {
                if self.registry.state(id) != SubsystemState::Inactive {
                    continue;
                }
                let Some(name) = self.registry.name_of(id) else {
                    continue;
                };
                if !ready.contains(name.as_str()) {
                    continue;
                }
                if !self.dependencies_running(id) {
                    continue;
                }

                if self.launch_one(id, &name) {
                    launched_this_pass = launched_this_pass.saturating_add(1);
                }
            }
            total = total.saturating_add(launched_this_pass);
            if launched_this_pass == 0 {
                break;
            }
        }
        total
    }

    /// Stop the subsystem and, first, everything that transitively depends
    /// on it.
    ///
    /// Returns `false` only for a stale id. An already-`Inactive` target is
    /// a no-op returning `true`. A worker that overruns the bounded wait
    /// moves its entry to `Error` and the walk continues.
    pub fn stop_with_dependents(&self, id: SubsystemId) -> bool {
        let Some(name) = self.registry.name_of(id) else {
            return false;
        };

        let plan = self.stop_plan(id);
        if self.registry.state(id) != SubsystemState::Inactive {
            info!(target: "landing", subsystem = %name, dependents = plan.len().saturating_sub(1), "stopping");
        }
        for target in plan {
            self.stop_one(target);
        }
        true
    }

    /// Land everything: every `Running` subsystem, reverse declaration
    /// order, dependents first.
    pub fn land_all(&self) {
        info!(target: "landing", "landing sequence started");
        let mut ids = self.registry.ids();
        ids.reverse();
        for id in ids {
            if self.registry.state(id) == SubsystemState::Running {
                self.stop_with_dependents(id);
            }
        }
        info!(target: "landing", "landing sequence complete");
    }

    // -----------------------------------------------------------------

    fn dependencies_running(&self, id: SubsystemId) -> bool {
        self.registry
            .dependencies_of(id)
            .iter()
            .all(|dep| self.registry.is_running_by_name(dep))
    }

    /// Start one subsystem: Inactive → Starting → Running, or → Error on
    /// a failed `init`. The callback runs without the registry lock.
    fn launch_one(&self, id: SubsystemId, name: &str) -> bool {
        let Some(subsystem) = self.registry.subsystem(id) else {
            return false;
        };
        self.registry.update_state(id, SubsystemState::Starting);
        match subsystem.init() {
            Ok(()) => {
                self.registry.update_state(id, SubsystemState::Running);
                info!(target: "launch", subsystem = %name, "launched");
                true
            },
            Err(e) => {
                self.registry.update_state(id, SubsystemState::Error);
                warn!(target: "launch", subsystem = %name, error = %e, "init failed");
                false
            },
        }
    }

    /// Compute the stop order for a subsystem: its transitive dependents
    /// first (an entry stops only after everything that depends on it),
    /// ties broken by reverse declaration order, the subsystem itself
    /// last.
    fn stop_plan(&self, target: SubsystemId) -> Vec<SubsystemId> {
        // Transitive dependents via a worklist over reverse edges.
        let all_ids = self.registry.ids();
        let mut affected: Vec<SubsystemId> = vec![target];
        let mut worklist = vec![target];
        while let Some(current) = worklist.pop() {
            let Some(current_name) = self.registry.name_of(current) else {
                continue;
            };
            for &candidate in &all_ids {
                if affected.contains(&candidate) {
                    continue;
                }
                if self
                    .registry
                    .dependencies_of(candidate)
                    .iter()
                    .any(|d| *d == current_name)
                {
                    affected.push(candidate);
                    worklist.push(candidate);
                }
            }
        }

        // Peel off entries nothing in the remaining set depends on,
        // considering candidates in reverse declaration order.
        let mut plan = Vec::with_capacity(affected.len());
        let mut remaining: Vec<SubsystemId> = all_ids
            .iter()
            .copied()
            .filter(|id| affected.contains(id))
            .collect();
        while !remaining.is_empty() {
            let next = remaining
                .iter()
                .rev()
                .copied()
                .find(|&candidate| {
                    let Some(candidate_name) = self.registry.name_of(candidate) else {
                        return true;
                    };
                    !remaining.iter().any(|&other| {
                        other != candidate
                            && self
                                .registry
                                .dependencies_of(other)
                                .iter()
                                .any(|d| *d == candidate_name)
                    })
                })
                // A dependency cycle: fall back to reverse declaration order.
                .or_else(|| remaining.last().copied());

            if let Some(chosen) = next {
                remaining.retain(|&id| id != chosen);
                plan.push(chosen);
            }
        }
        plan
    }

    /// Stop one subsystem: Running → Stopping → Inactive, or → Error when
    /// the worker overruns the bounded wait. Only `Running` entries get
    /// their `shutdown` called.
    fn stop_one(&self, id: SubsystemId) {
        match self.registry.state(id) {
            SubsystemState::Running => {},
            // Inactive is a no-op; Starting/Stopping/Error are never
            // shut down from here.
            _ => return,
        }
        let Some(subsystem) = self.registry.subsystem(id) else {
            return;
        };
        let name = subsystem.name().to_owned();

        self.registry.update_state(id, SubsystemState::Stopping);
        self.registry.signal_shutdown(id);
        subsystem.shutdown();

        let started = Instant::now();
        while !self.registry.worker_finished(id) {
            if started.elapsed() >= self.stop_wait {
                warn!(
                    target: "landing",
                    subsystem = %name,
                    waited_ms = u64::try_from(self.stop_wait.as_millis()).unwrap_or(u64::MAX),
                    "worker did not stop within the bounded wait"
                );
                self.registry.update_state(id, SubsystemState::Error);
                return;
            }
            std::thread::sleep(self.poll_interval);
        }

        self.registry.update_state(id, SubsystemState::Inactive);
        info!(target: "landing", subsystem = %name, "stopped");
    }
}
