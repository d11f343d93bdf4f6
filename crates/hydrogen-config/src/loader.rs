//! Source discovery, parsing, and the process-wide config slot.
//!
//! The loading algorithm:
//!
//! 1. Resolve the source file: `HYDROGEN_CONFIG`, else the command-line
//!    path, else the first readable default location. An explicitly named
//!    source that cannot be read or parsed is fatal; having no source at
//!    all just means an all-defaults configuration.
//! 2. Parse the JSON document (the top level must be an object).
//! 3. Start from [`AppConfig::default()`] and run the section loaders in
//!    fixed section order; any section failure discards the partial config.
//! 4. Install the result in the process-wide slot, atomically replacing
//!    (and dropping) any prior configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::resolve::{EnvVars, collect_env_vars};
use crate::sections;
use crate::types::AppConfig;

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "HYDROGEN_CONFIG";

/// Default locations probed when no explicit source is given, in order.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "hydrogen.json",
    "/etc/hydrogen/hydrogen.json",
    "/usr/local/etc/hydrogen/hydrogen.json",
];

/// The process-wide configuration slot.
///
/// Exactly one `AppConfig` is current at any time; [`load_config`] swaps a
/// freshly built one in (dropping the old), readers clone the `Arc` out.
static CURRENT: RwLock<Option<Arc<AppConfig>>> = RwLock::new(None);

/// Load the configuration and install it as the process-wide config.
///
/// On restart this replaces the previous configuration atomically; readers
/// holding an `Arc` from [`current_config`] keep the snapshot they have.
///
/// # Errors
///
/// Fails when an explicitly named source is unreadable or malformed, or
/// when a section loader rejects its subtree.
pub fn load_config(cmdline_path: Option<&Path>) -> ConfigResult<Arc<AppConfig>> {
    let env = collect_env_vars();
    let config = match locate_source(cmdline_path, &env) {
        Some(path) => {
            let label = path.display().to_string();
            let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
                path: label.clone(),
                source: e,
            })?;
            info!(target: "config", path = %label, "loading configuration");
            load_from_str_at(&text, &env, &label)?
        },
        None => {
            info!(
                target: "config",
                attempted = ?DEFAULT_CONFIG_PATHS,
                "no configuration file found; using defaults"
            );
            load_from_str_at("{}", &env, "<defaults>")?
        },
    };

    let config = Arc::new(config);
    *CURRENT.write() = Some(Arc::clone(&config));
    Ok(config)
}

/// Read-only snapshot of the current process-wide configuration.
#[must_use]
pub fn current_config() -> Option<Arc<AppConfig>> {
    CURRENT.read().clone()
}

/// Drop the process-wide configuration. Called at process shutdown;
/// idempotent.
pub fn cleanup_application_config() {
    *CURRENT.write() = None;
}

/// Parse and populate a configuration from a JSON string.
///
/// The pure core of [`load_config`]: no filesystem access, no process-wide
/// state, the environment passed in as a value.
///
/// # Errors
///
/// Fails on malformed JSON, a non-object top level, or a section rejection.
pub fn load_config_from_str(json: &str, env: &EnvVars) -> ConfigResult<AppConfig> {
    load_from_str_at(json, env, "<inline>")
}

fn load_from_str_at(json: &str, env: &EnvVars, path: &str) -> ConfigResult<AppConfig> {
    let root: Value = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
        path: path.to_owned(),
        source: e,
    })?;
    if !root.is_object() {
        return Err(ConfigError::Invalid {
            path: path.to_owned(),
            message: "top level must be a JSON object".to_owned(),
        });
    }

    let mut config = AppConfig::default();
    sections::load_all(&root, &mut config, env)?;
    Ok(config)
}

/// Resolve the configuration source path.
///
/// `HYDROGEN_CONFIG` and the command-line path are explicit: they are
/// returned unchecked so that an unreadable file surfaces as a fatal
/// error. The default locations are probed and skipped when unreadable.
fn locate_source(cmdline_path: Option<&Path>, env: &EnvVars) -> Option<PathBuf> {
    if let Some(path) = env.get(CONFIG_ENV_VAR) {
        debug!(target: "config", path = %path, "config path from HYDROGEN_CONFIG");
        return Some(PathBuf::from(path));
    }
    if let Some(path) = cmdline_path {
        debug!(target: "config", path = %path.display(), "config path from command line");
        return Some(path.to_path_buf());
    }
    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        debug!(target: "config", path = candidate, "config candidate not readable; skipping");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = load_config_from_str("{}", &EnvVars::new()).unwrap();
        assert_eq!(config.webserver.port, 5000);
        assert_eq!(config.websocket.port, 5001);
        assert!(config.terminal.enabled);
        assert_eq!(config.databases.connection_count, 0);
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let result = load_config_from_str("{ not json", &EnvVars::new());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_non_object_top_level_is_fatal() {
        let result = load_config_from_str("[1, 2, 3]", &EnvVars::new());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_explicit_env_path_wins_over_cmdline() {
        let mut env = EnvVars::new();
        env.insert(CONFIG_ENV_VAR.to_owned(), "/tmp/from-env.json".to_owned());
        let located = locate_source(Some(Path::new("/tmp/from-cli.json")), &env);
        assert_eq!(located, Some(PathBuf::from("/tmp/from-env.json")));
    }

    #[test]
    fn test_cmdline_path_used_when_env_unset() {
        let located = locate_source(Some(Path::new("/tmp/from-cli.json")), &EnvVars::new());
        assert_eq!(located, Some(PathBuf::from("/tmp/from-cli.json")));
    }

    #[test]
    fn test_slot_replace_and_cleanup() {
        cleanup_application_config();
        assert!(current_config().is_none());

        let config = Arc::new(AppConfig::default());
        *CURRENT.write() = Some(Arc::clone(&config));
        assert!(current_config().is_some());

        // Replacing swaps the slot; the old snapshot stays valid for holders.
        let replacement = Arc::new(AppConfig::default());
        *CURRENT.write() = Some(replacement);
        assert_eq!(config.webserver.port, 5000);

        cleanup_application_config();
        assert!(current_config().is_none());
    }
}
