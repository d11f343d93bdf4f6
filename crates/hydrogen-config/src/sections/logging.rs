//! Logging section loader: per-destination levels and subsystem
//! overrides.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use super::{
    emit_group, emit_header, emit_value, field_bool, field_level, group_node, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::{EnvVars, Provenance, Resolved};
use crate::types::{AppConfig, KNOWN_LEVELS, LogDestination, LoggingConfig};

const KNOWN_KEYS: &[&str] = &["Console", "File", "Database", "Notify"];
const KNOWN_DESTINATION_KEYS: &[&str] = &["Enabled", "DefaultLevel", "Subsystems"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Logging");
    emit_header("Logging", node.is_some());
    warn_unknown_keys("Logging", node, KNOWN_KEYS);

    let d = LoggingConfig::default();
    config.logging.console = load_destination(node, "Console", &d.console, env);
    config.logging.file = load_destination(node, "File", &d.file, env);
    config.logging.database = load_destination(node, "Database", &d.database, env);
    config.logging.notify = load_destination(node, "Notify", &d.notify, env);
    Ok(())
}

fn load_destination(
    node: Option<&Value>,
    key: &str,
    defaults: &LogDestination,
    env: &EnvVars,
) -> LogDestination {
    let dest = group_node(node, key);
    emit_group(1, key);
    warn_unknown_keys("Logging", dest, KNOWN_DESTINATION_KEYS);

    LogDestination {
        enabled: field_bool(2, "Enabled", dest, defaults.enabled, env),
        default_level: field_level(2, "DefaultLevel", dest, &defaults.default_level, env),
        subsystems: load_subsystem_overrides(dest),
    }
}

/// Load the `Subsystems` override map. Entries with an unknown level are
/// dropped with a warning; `BTreeMap` keeps the name ordering stable.
fn load_subsystem_overrides(dest: Option<&Value>) -> BTreeMap<String, String> {
    let mut overrides = BTreeMap::new();
    let Some(Value::Object(map)) = dest.and_then(|n| n.get("Subsystems")) else {
        return overrides;
    };

    for (subsystem, level) in map {
        let lower = level.as_str().map(str::to_ascii_lowercase);
        match lower {
            Some(level) if KNOWN_LEVELS.contains(&level.as_str()) => {
                emit_value(
                    3,
                    subsystem,
                    &Resolved {
                        value: level.clone(),
                        provenance: Provenance::Config,
                    },
                );
                overrides.insert(subsystem.clone(), level);
            },
            _ => {
                warn!(
                    target: "config",
                    subsystem = %subsystem,
                    level = %level,
                    "unknown subsystem log level; entry ignored"
                );
            },
        }
    }
    overrides
}
