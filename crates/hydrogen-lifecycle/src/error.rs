use thiserror::Error;

/// Registry operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A subsystem name must be non-empty.
    #[error("subsystem name must not be empty")]
    EmptyName,

    /// The name is already registered; the original entry is untouched.
    #[error("subsystem '{0}' is already registered")]
    DuplicateName(String),

    /// The id does not name a live entry (stale after a registry reset,
    /// or never valid).
    #[error("subsystem id is not valid")]
    InvalidId,

    /// The entry already carries the maximum number of dependencies.
    #[error("subsystem '{subsystem}' already has {limit} dependencies")]
    DependencyLimit {
        /// The entry that hit the cap.
        subsystem: String,
        /// The cap ([`crate::MAX_DEPENDENCIES`]).
        limit: usize,
    },
}

/// Failure reported by a subsystem's `init` callback.
#[derive(Debug, Clone, Error)]
#[error("[{subsystem}] {message}")]
pub struct SubsystemError {
    /// Name of the failing subsystem.
    pub subsystem: String,
    /// Failure description.
    pub message: String,
}

impl SubsystemError {
    /// Build an error for `subsystem` with the given message.
    #[must_use]
    pub fn new(subsystem: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subsystem: subsystem.into(),
            message: message.into(),
        }
    }
}
