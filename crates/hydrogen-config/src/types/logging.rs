use std::collections::BTreeMap;

use serde::Serialize;

/// Log levels a destination or subsystem override may name.
pub(crate) const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "fatal"];

/// Logging destinations. Each destination filters independently.
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    /// Stderr destination.
    pub console: LogDestination,
    /// File destination; path comes from `Server.LogFile`.
    pub file: LogDestination,
    /// Database destination.
    pub database: LogDestination,
    /// Notification destination (feeds the Notify subsystem).
    pub notify: LogDestination,
}

impl Default for LoggingConfig {
    /// Baseline: console on at `info`, every other destination off.
    fn default() -> Self {
        Self {
            console: LogDestination {
                enabled: true,
                ..LogDestination::default()
            },
            file: LogDestination::default(),
            database: LogDestination::default(),
            notify: LogDestination::default(),
        }
    }
}

/// Filter settings for one log destination.
#[derive(Debug, Clone, Serialize)]
pub struct LogDestination {
    /// Whether the destination receives anything at all.
    pub enabled: bool,
    /// Level applied to subsystems without an explicit override.
    pub default_level: String,
    /// Per-subsystem level overrides, ordered by subsystem name.
    pub subsystems: BTreeMap<String, String>,
}

impl Default for LogDestination {
    fn default() -> Self {
        Self {
            enabled: false,
            default_level: "info".to_owned(),
            subsystems: BTreeMap::new(),
        }
    }
}
