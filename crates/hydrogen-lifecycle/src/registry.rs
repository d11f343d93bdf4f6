//! The subsystem registry and its state machine.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::subsystem::{Subsystem, SubsystemState, WorkerHandle};

/// Maximum declared dependencies per subsystem.
pub const MAX_DEPENDENCIES: usize = 20;

/// Opaque, copyable handle to a registry entry.
///
/// Ids are stamped with the registry generation: after a [`SubsystemRegistry::clear`]
/// every previously issued id stops resolving, even though entry indices
/// are reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubsystemId {
    generation: u32,
    index: u32,
}

struct SubsystemEntry {
    name: String,
    state: SubsystemState,
    state_changed_at: Instant,
    subsystem: Arc<dyn Subsystem>,
    handle: Option<Box<dyn WorkerHandle>>,
    dependencies: Vec<String>,
}

struct RegistryInner {
    generation: u32,
    entries: Vec<SubsystemEntry>,
}

/// Registry of named subsystems with declared dependencies.
///
/// One well-known handle is created at startup and shared with the
/// controller. Every operation takes the registry-wide lock internally;
/// `init`/`shutdown` callbacks are never invoked under it.
pub struct SubsystemRegistry {
    inner: RwLock<RegistryInner>,
}

impl Default for SubsystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsystemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                generation: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register a subsystem, optionally with a worker control handle.
    ///
    /// The new entry starts `Inactive` with no dependencies and keeps its
    /// id until the next [`clear`](Self::clear).
    ///
    /// # Errors
    ///
    /// Fails on an empty name or a name that is already registered; the
    /// existing entry is untouched.
    pub fn register(
        &self,
        subsystem: Arc<dyn Subsystem>,
        handle: Option<Box<dyn WorkerHandle>>,
    ) -> Result<SubsystemId, RegistryError> {
        let name = subsystem.name().to_owned();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut inner = self.inner.write();
        if inner.entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let index = u32::try_from(inner.entries.len()).map_err(|_| RegistryError::InvalidId)?;
        inner.entries.push(SubsystemEntry {
            name: name.clone(),
            state: SubsystemState::Inactive,
            state_changed_at: Instant::now(),
            subsystem,
            handle,
            dependencies: Vec::new(),
        });
        let id = SubsystemId {
            generation: inner.generation,
            index,
        };
        debug!(subsystem = %name, ?id, "subsystem registered");
        Ok(id)
    }

    /// Declare that the entry depends on `dep_name`.
    ///
    /// The dependency may name a subsystem that is not registered yet
    /// (forward declaration); resolution happens when queried. Declaring
    /// the same dependency twice is idempotent.
    ///
    /// # Errors
    ///
    /// Fails on a stale id, an empty dependency name, or an entry already
    /// carrying [`MAX_DEPENDENCIES`] dependencies.
    pub fn add_dependency(&self, id: SubsystemId, dep_name: &str) -> Result<(), RegistryError> {
        if dep_name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut inner = self.inner.write();
        let generation = inner.generation;
        let entry = entry_mut(&mut inner, generation, id).ok_or(RegistryError::InvalidId)?;

        if entry.dependencies.iter().any(|d| d == dep_name) {
            return Ok(());
        }
        if entry.dependencies.len() >= MAX_DEPENDENCIES {
            return Err(RegistryError::DependencyLimit {
                subsystem: entry.name.clone(),
                limit: MAX_DEPENDENCIES,
            });
        }
        entry.dependencies.push(dep_name.to_owned());
        Ok(())
    }

    /// Reset the registry: drop every entry and invalidate every
    /// outstanding id. Idempotent, and safe to call after interrupted
    /// operations.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let count = inner.entries.len();
        inner.entries.clear();
        inner.generation = inner.generation.wrapping_add(1);
        if count > 0 {
            info!(dropped = count, "subsystem registry reset");
        }
    }

    /// Record a state transition with its timestamp. No-op on a stale id.
    pub fn update_state(&self, id: SubsystemId, new_state: SubsystemState) {
        let mut inner = self.inner.write();
        let generation = inner.generation;
        if let Some(entry) = entry_mut(&mut inner, generation, id) {
            if entry.state != new_state {
                debug!(
                    subsystem = %entry.name,
                    from = %entry.state,
                    to = %new_state,
                    "state transition"
                );
            }
            entry.state = new_state;
            entry.state_changed_at = Instant::now();
        }
    }

    /// Current state of the entry; `Inactive` for a stale id.
    #[must_use]
    pub fn state(&self, id: SubsystemId) -> SubsystemState {
        self.with_entry(id, |e| e.state).unwrap_or(SubsystemState::Inactive)
    }

    /// When the entry last changed state.
    #[must_use]
    pub fn state_changed_at(&self, id: SubsystemId) -> Option<Instant> {
        self.with_entry(id, |e| e.state_changed_at)
    }

    /// Whether the entry is `Running`.
    #[must_use]
    pub fn is_running(&self, id: SubsystemId) -> bool {
        self.state(id) == SubsystemState::Running
    }

    /// Whether the named subsystem is registered and `Running`.
    #[must_use]
    pub fn is_running_by_name(&self, name: &str) -> bool {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .any(|e| e.name == name && e.state == SubsystemState::Running)
    }

    /// Id of the named subsystem, if registered.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<SubsystemId> {
        let inner = self.inner.read();
        inner.entries.iter().position(|e| e.name == name).map(|index| SubsystemId {
            generation: inner.generation,
            index: u32::try_from(index).unwrap_or(u32::MAX),
        })
    }

    /// Name of the entry.
    #[must_use]
    pub fn name_of(&self, id: SubsystemId) -> Option<String> {
        self.with_entry(id, |e| e.name.clone())
    }

    /// Number of declared dependencies.
    #[must_use]
    pub fn dependency_count(&self, id: SubsystemId) -> Option<usize> {
        self.with_entry(id, |e| e.dependencies.len())
    }

    /// The `index`-th declared dependency name.
    #[must_use]
    pub fn dependency(&self, id: SubsystemId, index: usize) -> Option<String> {
        self.with_entry(id, |e| e.dependencies.get(index).cloned())?
    }

    /// Every registered name, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.inner.read().entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Every live id, in declaration order.
    #[must_use]
    pub fn ids(&self) -> Vec<SubsystemId> {
        let inner = self.inner.read();
        (0..inner.entries.len())
            .map(|index| SubsystemId {
                generation: inner.generation,
                index: u32::try_from(index).unwrap_or(u32::MAX),
            })
            .collect()
    }

    /// Number of registered subsystems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    // -- crate-internal access for the controller --------------------------

    /// The subsystem object, cloned out so callbacks run without the lock.
    pub(crate) fn subsystem(&self, id: SubsystemId) -> Option<Arc<dyn Subsystem>> {
        self.with_entry(id, |e| Arc::clone(&e.subsystem))
    }

    /// Declared dependency names, cloned out.
    pub(crate) fn dependencies_of(&self, id: SubsystemId) -> Vec<String> {
        self.with_entry(id, |e| e.dependencies.clone()).unwrap_or_default()
    }

    /// Raise the entry's shutdown flag through its worker handle.
    pub(crate) fn signal_shutdown(&self, id: SubsystemId) {
        let inner = self.inner.read();
        if let Some(handle) = entry_ref(&inner, id).and_then(|e| e.handle.as_ref()) {
            handle.signal_shutdown();
        }
    }

    /// Whether the entry's worker has stopped. Entries without a handle
    /// count as finished.
    pub(crate) fn worker_finished(&self, id: SubsystemId) -> bool {
        let inner = self.inner.read();
        entry_ref(&inner, id)
            .and_then(|e| e.handle.as_ref())
            .is_none_or(|h| h.is_finished())
    }

    fn with_entry<T>(&self, id: SubsystemId, f: impl FnOnce(&SubsystemEntry) -> T) -> Option<T> {
        let inner = self.inner.read();
        entry_ref(&inner, id).map(f)
    }
}

fn entry_ref(inner: &RegistryInner, id: SubsystemId) -> Option<&SubsystemEntry> {
    if id.generation != inner.generation {
        return None;
    }
    inner.entries.get(id.index as usize)
}

fn entry_mut(
    inner: &mut RegistryInner,
    generation: u32,
    id: SubsystemId,
) -> Option<&mut SubsystemEntry> {
    if id.generation != generation {
        return None;
    }
    inner.entries.get_mut(id.index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubsystemError;
    use crate::readiness::LaunchReadiness;
    use hydrogen_config::AppConfig;

    struct Stub {
        name: &'static str,
    }

    impl Subsystem for Stub {
        fn name(&self) -> &str {
            self.name
        }
        fn readiness(&self, _config: &AppConfig) -> LaunchReadiness {
            LaunchReadiness::ready(self.name)
        }
        fn init(&self) -> Result<(), SubsystemError> {
            Ok(())
        }
        fn shutdown(&self) {}
    }

    fn register_stub(registry: &SubsystemRegistry, name: &'static str) -> SubsystemId {
        registry.register(Arc::new(Stub { name }), None).unwrap()
    }

    #[test]
    fn test_register_then_lookup_round_trip() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "webserver");

        assert_eq!(registry.id_by_name("webserver"), Some(id));
        assert_eq!(registry.state(id), SubsystemState::Inactive);
        assert_eq!(registry.name_of(id).as_deref(), Some("webserver"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected_original_intact() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "srv");
        registry.update_state(id, SubsystemState::Running);

        let result = registry.register(Arc::new(Stub { name: "srv" }), None);
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateName("srv".to_owned()));

        // The first registration is untouched, state included.
        assert_eq!(registry.id_by_name("srv"), Some(id));
        assert_eq!(registry.state(id), SubsystemState::Running);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let registry = SubsystemRegistry::new();
        let result = registry.register(Arc::new(Stub { name: "" }), None);
        assert_eq!(result.unwrap_err(), RegistryError::EmptyName);
    }

    #[test]
    fn test_dependency_add_is_idempotent() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "api");

        registry.add_dependency(id, "webserver").unwrap();
        registry.add_dependency(id, "webserver").unwrap();
        assert_eq!(registry.dependency_count(id), Some(1));
        assert_eq!(registry.dependency(id, 0).as_deref(), Some("webserver"));
        assert_eq!(registry.dependency(id, 1), None);
    }

    #[test]
    fn test_dependency_cap_at_twenty() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "hub");

        for n in 0..MAX_DEPENDENCIES {
            registry.add_dependency(id, &format!("dep{n}")).unwrap();
        }
        assert_eq!(registry.dependency_count(id), Some(MAX_DEPENDENCIES));

        let overflow = registry.add_dependency(id, "one-too-many");
        assert_eq!(
            overflow.unwrap_err(),
            RegistryError::DependencyLimit {
                subsystem: "hub".to_owned(),
                limit: MAX_DEPENDENCIES,
            }
        );
        assert_eq!(registry.dependency_count(id), Some(MAX_DEPENDENCIES));
    }

    #[test]
    fn test_forward_declared_dependency_resolves_late() {
        let registry = SubsystemRegistry::new();
        let api = register_stub(&registry, "api");
        registry.add_dependency(api, "webserver").unwrap();

        assert!(!registry.is_running_by_name("webserver"));
        let web = register_stub(&registry, "webserver");
        registry.update_state(web, SubsystemState::Running);
        assert!(registry.is_running_by_name("webserver"));
    }

    #[test]
    fn test_clear_invalidates_outstanding_ids() {
        let registry = SubsystemRegistry::new();
        let old = register_stub(&registry, "webserver");
        registry.update_state(old, SubsystemState::Running);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.state(old), SubsystemState::Inactive);
        assert_eq!(registry.name_of(old), None);
        assert_eq!(registry.dependency_count(old), None);

        // The index is reused but the stale id still does not alias it.
        let fresh = register_stub(&registry, "replacement");
        registry.update_state(fresh, SubsystemState::Running);
        assert!(!registry.is_running(old));
        assert!(registry.is_running(fresh));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let registry = SubsystemRegistry::new();
        registry.clear();
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_state_timestamps_advance() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "webserver");
        let registered_at = registry.state_changed_at(id).unwrap();

        registry.update_state(id, SubsystemState::Starting);
        let started_at = registry.state_changed_at(id).unwrap();
        assert!(started_at >= registered_at);
    }

    #[test]
    fn test_queries_on_stale_id_are_forgiving() {
        let registry = SubsystemRegistry::new();
        let id = register_stub(&registry, "webserver");
        registry.clear();

        assert_eq!(registry.state(id), SubsystemState::Inactive);
        assert!(!registry.is_running(id));
        assert_eq!(registry.dependency(id, 0), None);
        // Mutation on a stale id is a no-op, not a panic.
        registry.update_state(id, SubsystemState::Running);
        assert!(!registry.is_running(id));
        assert_eq!(
            registry.add_dependency(id, "x").unwrap_err(),
            RegistryError::InvalidId
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let registry = SubsystemRegistry::new();
        register_stub(&registry, "first");
        register_stub(&registry, "second");
        register_stub(&registry, "third");
        assert_eq!(registry.names(), vec!["first", "second", "third"]);
    }
}
