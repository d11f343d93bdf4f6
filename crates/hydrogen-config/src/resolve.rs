//! Typed value resolution with provenance tracking.
//!
//! This module is the only place in the crate that inspects raw JSON node
//! types. Every resolver takes the candidate node (if any), a compiled-in
//! default, and a snapshot of the process environment, and produces a typed
//! value together with a [`Provenance`] tag recording where it came from.
//!
//! A string value matching exactly `${env.NAME}` defers to the environment:
//! if `NAME` is set its value is coerced to the target type, otherwise the
//! default is used and a warning names the missing variable.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::{error, warn};

/// Snapshot of the process environment, collected once per load.
///
/// Passing the environment by value keeps the resolvers pure and lets tests
/// supply their own maps without mutating process state.
pub type EnvVars = HashMap<String, String>;

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> EnvVars {
    std::env::vars().collect()
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Where a resolved configuration value came from.
///
/// Used only to shape the startup log: default-origin values get a trailing
/// `*`, env-resolved values show the variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Literal value taken straight from the config document.
    Config,
    /// `${env.NAME}` reference resolved from a set environment variable.
    Env(String),
    /// `${env.NAME}` reference whose variable was unset; default used.
    EnvMissing(String),
    /// No usable config value; compiled-in default used.
    Default,
}

impl Provenance {
    /// True when the value ultimately came from the defaults table.
    #[must_use]
    pub fn is_default_origin(&self) -> bool {
        matches!(self, Self::EnvMissing(_) | Self::Default)
    }

    /// The environment variable involved, if any.
    #[must_use]
    pub fn env_var(&self) -> Option<&str> {
        match self {
            Self::Env(var) | Self::EnvMissing(var) => Some(var),
            _ => None,
        }
    }
}

/// A resolved value together with its [`Provenance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// The typed value.
    pub value: T,
    /// Where the value came from.
    pub provenance: Provenance,
}

impl<T> Resolved<T> {
    fn new(value: T, provenance: Provenance) -> Self {
        Self { value, provenance }
    }
}

// ---------------------------------------------------------------------------
// Env references
// ---------------------------------------------------------------------------

/// If `s` is exactly `${env.NAME}` with an ASCII variable name, return
/// `NAME`. Partial matches and embedded references do not count.
fn env_reference(s: &str) -> Option<&str> {
    let name = s.strip_prefix("${env.")?.strip_suffix('}')?;
    if !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        Some(name)
    } else {
        None
    }
}

/// Resolve an env-deferred string node. Returns the raw environment value
/// on success, or `None` with the missing-variable provenance filled in.
fn lookup_env<'a>(key: &str, var: &str, env: &'a EnvVars) -> Option<&'a str> {
    match env.get(var) {
        Some(v) => Some(v.as_str()),
        None => {
            warn!(
                target: "config",
                key,
                var,
                "environment variable not set; using default"
            );
            None
        },
    }
}

// ---------------------------------------------------------------------------
// Resolvers
// ---------------------------------------------------------------------------

/// Resolve a string value.
///
/// A string node is taken literally unless it is an `${env.NAME}` reference;
/// any other node type (or an absent node) yields the default.
#[must_use]
pub fn resolve_string(key: &str, node: Option<&Value>, default: &str, env: &EnvVars) -> Resolved<String> {
    match node {
        Some(Value::String(s)) => match env_reference(s) {
            Some(var) => match lookup_env(key, var, env) {
                Some(v) => Resolved::new(v.to_owned(), Provenance::Env(var.to_owned())),
                None => Resolved::new(default.to_owned(), Provenance::EnvMissing(var.to_owned())),
            },
            None => Resolved::new(s.clone(), Provenance::Config),
        },
        _ => Resolved::new(default.to_owned(), Provenance::Default),
    }
}

/// Resolve a sensitive string value.
///
/// Identical contract to [`resolve_string`]; the distinction is for callers,
/// whose logging must mask the value via [`masked`].
#[must_use]
pub fn resolve_sensitive_string(
    key: &str,
    node: Option<&Value>,
    default: &str,
    env: &EnvVars,
) -> Resolved<String> {
    resolve_string(key, node, default, env)
}

/// Coerce a string to a bool: case-insensitive `true`/`1` and `false`/`0`.
fn bool_from_str(s: &str) -> Option<bool> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("true") || t == "1" {
        Some(true)
    } else if t.eq_ignore_ascii_case("false") || t == "0" {
        Some(false)
    } else {
        None
    }
}

/// Resolve a boolean value.
#[must_use]
pub fn resolve_bool(key: &str, node: Option<&Value>, default: bool, env: &EnvVars) -> Resolved<bool> {
    match node {
        Some(Value::Bool(b)) => Resolved::new(*b, Provenance::Config),
        Some(Value::String(s)) => match env_reference(s) {
            Some(var) => match lookup_env(key, var, env) {
                Some(v) => match bool_from_str(v) {
                    Some(b) => Resolved::new(b, Provenance::Env(var.to_owned())),
                    None => {
                        warn!(target: "config", key, var, value = v, "env value is not a boolean; using default");
                        Resolved::new(default, Provenance::Default)
                    },
                },
                None => Resolved::new(default, Provenance::EnvMissing(var.to_owned())),
            },
            None => match bool_from_str(s) {
                Some(b) => Resolved::new(b, Provenance::Config),
                None => Resolved::new(default, Provenance::Default),
            },
        },
        _ => Resolved::new(default, Provenance::Default),
    }
}

/// Resolve a signed integer value. Accepts integer nodes and decimal
/// strings (directly or via env reference).
#[must_use]
pub fn resolve_int(key: &str, node: Option<&Value>, default: i64, env: &EnvVars) -> Resolved<i64> {
    match node {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Resolved::new(i, Provenance::Config),
            None => {
                error!(target: "config", key, value = %n, "number is not a valid integer; using default");
                Resolved::new(default, Provenance::Default)
            },
        },
        Some(Value::String(s)) => match env_reference(s) {
            Some(var) => match lookup_env(key, var, env) {
                Some(v) => match v.trim().parse::<i64>() {
                    Ok(i) => Resolved::new(i, Provenance::Env(var.to_owned())),
                    Err(_) => {
                        warn!(target: "config", key, var, value = v, "env value is not an integer; using default");
                        Resolved::new(default, Provenance::Default)
                    },
                },
                None => Resolved::new(default, Provenance::EnvMissing(var.to_owned())),
            },
            None => match s.trim().parse::<i64>() {
                Ok(i) => Resolved::new(i, Provenance::Config),
                Err(_) => Resolved::new(default, Provenance::Default),
            },
        },
        _ => Resolved::new(default, Provenance::Default),
    }
}

/// Resolve a signed integer and reject values outside `range`.
///
/// An out-of-range value is replaced with the default and logged at ERROR,
/// per the non-fatal out-of-range policy.
#[must_use]
pub fn resolve_int_in(
    key: &str,
    node: Option<&Value>,
    default: i64,
    range: RangeInclusive<i64>,
    env: &EnvVars,
) -> Resolved<i64> {
    let resolved = resolve_int(key, node, default, env);
    if range.contains(&resolved.value) {
        resolved
    } else {
        error!(
            target: "config",
            key,
            value = resolved.value,
            min = *range.start(),
            max = *range.end(),
            "value out of range; using default"
        );
        Resolved::new(default, Provenance::Default)
    }
}

/// Resolve an unsigned size value. Negative numbers are rejected with an
/// ERROR log and the default is used.
#[must_use]
pub fn resolve_size(key: &str, node: Option<&Value>, default: u64, env: &EnvVars) -> Resolved<u64> {
    match node {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(u) => Resolved::new(u, Provenance::Config),
            None => {
                error!(target: "config", key, value = %n, "size must be a non-negative integer; using default");
                Resolved::new(default, Provenance::Default)
            },
        },
        Some(Value::String(s)) => match env_reference(s) {
            Some(var) => match lookup_env(key, var, env) {
                Some(v) => match v.trim().parse::<u64>() {
                    Ok(u) => Resolved::new(u, Provenance::Env(var.to_owned())),
                    Err(_) => {
                        warn!(target: "config", key, var, value = v, "env value is not a valid size; using default");
                        Resolved::new(default, Provenance::Default)
                    },
                },
                None => Resolved::new(default, Provenance::EnvMissing(var.to_owned())),
            },
            None => match s.trim().parse::<u64>() {
                Ok(u) => Resolved::new(u, Provenance::Config),
                Err(_) => Resolved::new(default, Provenance::Default),
            },
        },
        _ => Resolved::new(default, Provenance::Default),
    }
}

/// Resolve a floating-point value. Accepts decimal and scientific notation;
/// NaN and infinities are rejected with an ERROR log.
#[must_use]
pub fn resolve_double(key: &str, node: Option<&Value>, default: f64, env: &EnvVars) -> Resolved<f64> {
    let checked = |value: f64, provenance: Provenance| {
        if value.is_finite() {
            Resolved::new(value, provenance)
        } else {
            error!(target: "config", key, value, "number must be finite; using default");
            Resolved::new(default, Provenance::Default)
        }
    };
    match node {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => checked(f, Provenance::Config),
            None => Resolved::new(default, Provenance::Default),
        },
        Some(Value::String(s)) => match env_reference(s) {
            Some(var) => match lookup_env(key, var, env) {
                Some(v) => match v.trim().parse::<f64>() {
                    Ok(f) => checked(f, Provenance::Env(var.to_owned())),
                    Err(_) => {
                        warn!(target: "config", key, var, value = v, "env value is not a number; using default");
                        Resolved::new(default, Provenance::Default)
                    },
                },
                None => Resolved::new(default, Provenance::EnvMissing(var.to_owned())),
            },
            None => match s.trim().parse::<f64>() {
                Ok(f) => checked(f, Provenance::Config),
                Err(_) => Resolved::new(default, Provenance::Default),
            },
        },
        _ => Resolved::new(default, Provenance::Default),
    }
}

// ---------------------------------------------------------------------------
// Sensitive keys
// ---------------------------------------------------------------------------

/// Substrings that mark a key as holding secret material.
const SENSITIVE_MARKERS: &[&str] = &["key", "token", "pass", "seed", "jwt", "secret"];

/// True when `key` names a value that must be masked in logs.
#[must_use]
pub fn is_sensitive_name(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SENSITIVE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Mask a sensitive value for display: first five characters plus `...`.
#[must_use]
pub fn masked(value: &str) -> String {
    let prefix: String = value.chars().take(5).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env_of(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_string_literal_from_config() {
        let node = json!("hydra");
        let r = resolve_string("ServerName", Some(&node), "hydrogen", &EnvVars::new());
        assert_eq!(r.value, "hydra");
        assert_eq!(r.provenance, Provenance::Config);
    }

    #[test]
    fn test_string_absent_uses_default() {
        let r = resolve_string("ServerName", None, "hydrogen", &EnvVars::new());
        assert_eq!(r.value, "hydrogen");
        assert_eq!(r.provenance, Provenance::Default);
    }

    #[test]
    fn test_string_wrong_type_uses_default() {
        let node = json!(42);
        let r = resolve_string("ServerName", Some(&node), "hydrogen", &EnvVars::new());
        assert_eq!(r.value, "hydrogen");
        assert_eq!(r.provenance, Provenance::Default);
    }

    #[test]
    fn test_string_env_resolved() {
        let node = json!("${env.SERVER_NAME}");
        let env = env_of(&[("SERVER_NAME", "deuterium")]);
        let r = resolve_string("ServerName", Some(&node), "hydrogen", &env);
        assert_eq!(r.value, "deuterium");
        assert_eq!(r.provenance, Provenance::Env("SERVER_NAME".to_owned()));
    }

    #[test]
    fn test_string_env_missing_uses_default() {
        let node = json!("${env.SERVER_NAME}");
        let r = resolve_string("ServerName", Some(&node), "hydrogen", &EnvVars::new());
        assert_eq!(r.value, "hydrogen");
        assert_eq!(
            r.provenance,
            Provenance::EnvMissing("SERVER_NAME".to_owned())
        );
        assert!(r.provenance.is_default_origin());
    }

    #[test]
    fn test_env_reference_must_match_exactly() {
        // Embedded or malformed references are literals, not env lookups.
        for raw in ["prefix ${env.X}", "${env.}", "${env.BAD NAME}", "${ENV.X}"] {
            let node = json!(raw);
            let r = resolve_string("Key", Some(&node), "d", &env_of(&[("X", "v")]));
            assert_eq!(r.value, raw);
            assert_eq!(r.provenance, Provenance::Config);
        }
    }

    #[test]
    fn test_no_resolved_value_is_a_reference_token() {
        let node = json!("${env.MISSING}");
        let env = EnvVars::new();
        let r = resolve_string("Key", Some(&node), "fallback", &env);
        assert!(!r.value.starts_with("${env."));
    }

    #[test]
    fn test_bool_coercions() {
        let env = EnvVars::new();
        assert!(resolve_bool("E", Some(&json!(true)), false, &env).value);
        assert!(resolve_bool("E", Some(&json!("TRUE")), false, &env).value);
        assert!(resolve_bool("E", Some(&json!("1")), false, &env).value);
        assert!(!resolve_bool("E", Some(&json!("false")), true, &env).value);
        assert!(!resolve_bool("E", Some(&json!("0")), true, &env).value);
        // Unrecognized strings fall back to the default.
        let r = resolve_bool("E", Some(&json!("yes")), true, &env);
        assert!(r.value);
        assert_eq!(r.provenance, Provenance::Default);
    }

    #[test]
    fn test_bool_env() {
        let env = env_of(&[("FLAG", "1")]);
        let r = resolve_bool("E", Some(&json!("${env.FLAG}")), false, &env);
        assert!(r.value);
        assert_eq!(r.provenance, Provenance::Env("FLAG".to_owned()));
    }

    #[test]
    fn test_int_from_number_and_string() {
        let env = EnvVars::new();
        assert_eq!(resolve_int("P", Some(&json!(5000)), 0, &env).value, 5000);
        assert_eq!(resolve_int("P", Some(&json!("5001")), 0, &env).value, 5001);
        assert_eq!(resolve_int("P", Some(&json!(-3)), 0, &env).value, -3);
    }

    #[test]
    fn test_int_in_range_bounds() {
        let env = EnvVars::new();
        let r = resolve_int_in("Port", Some(&json!(1024)), 80, 1024..=65535, &env);
        assert_eq!(r.value, 1024);
        let r = resolve_int_in("Port", Some(&json!(65535)), 80, 1024..=65535, &env);
        assert_eq!(r.value, 65535);
        let r = resolve_int_in("Port", Some(&json!(1023)), 80, 1024..=65535, &env);
        assert_eq!(r.value, 80);
        assert_eq!(r.provenance, Provenance::Default);
    }

    #[test]
    fn test_size_rejects_negative() {
        let env = EnvVars::new();
        let r = resolve_size("MaxUploadSize", Some(&json!(-1)), 1024, &env);
        assert_eq!(r.value, 1024);
        assert_eq!(r.provenance, Provenance::Default);
        assert_eq!(resolve_size("S", Some(&json!(2048)), 0, &env).value, 2048);
    }

    #[test]
    fn test_double_scientific_and_nonfinite() {
        let env = EnvVars::new();
        let r = resolve_double("MaxSpeed", Some(&json!("1.5e2")), 0.0, &env);
        assert!((r.value - 150.0).abs() < f64::EPSILON);
        let r = resolve_double("MaxSpeed", Some(&json!("NaN")), 42.0, &env);
        assert!((r.value - 42.0).abs() < f64::EPSILON);
        assert_eq!(r.provenance, Provenance::Default);
        let r = resolve_double("MaxSpeed", Some(&json!("inf")), 42.0, &env);
        assert!((r.value - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sensitive_name_detection() {
        for key in ["PayloadKey", "JWTSecret", "Pass", "password", "SigningKey", "seed_phrase", "ApiToken"] {
            assert!(is_sensitive_name(key), "{key} should be sensitive");
        }
        for key in ["ServerName", "Port", "WebRoot", "Enabled"] {
            assert!(!is_sensitive_name(key), "{key} should not be sensitive");
        }
    }

    #[test]
    fn test_masked_truncates_to_five() {
        assert_eq!(masked("abcdef123456"), "abcde...");
        assert_eq!(masked("abc"), "abc...");
        assert_eq!(masked(""), "...");
    }
}
