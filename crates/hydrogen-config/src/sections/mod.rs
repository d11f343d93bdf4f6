//! Per-domain section loaders.
//!
//! One loader per top-level config section, run in a fixed order (Server first, Notify last) by
//! [`load_all`]. Each loader fully populates its substructure (defaults
//! fill in for anything the document omits) and emits the structured
//! provenance log: one header line per section, one line per resolved
//! field, default-origin values marked with a trailing `*`, env-resolved
//! values showing the variable name, sensitive values masked.

mod api;
mod databases;
mod logging;
mod mail;
mod mdns_client;
mod mdns_server;
mod network;
mod notify;
mod oidc;
mod print;
mod resources;
mod server;
mod swagger;
mod terminal;
mod webserver;
mod websocket;

use std::fmt::Display;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::ConfigResult;
use crate::resolve::{
    EnvVars, Provenance, Resolved, is_sensitive_name, masked, resolve_bool, resolve_double,
    resolve_int_in, resolve_sensitive_string, resolve_size, resolve_string,
};
use crate::types::AppConfig;

/// Recognized top-level section keys, in load order.
const SECTION_KEYS: &[&str] = &[
    "Server",
    "Network",
    "Databases",
    "Logging",
    "WebServer",
    "API",
    "Swagger",
    "WebSocket",
    "Terminal",
    "mDNSServer",
    "mDNSClient",
    "MailRelay",
    "Print",
    "Resources",
    "OIDC",
    "Notify",
];

/// Run every section loader against `root` in the fixed section order.
///
/// Any loader failure aborts the whole load; the caller discards the
/// partially populated config.
pub(crate) fn load_all(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    warn_unknown_keys("top level", Some(root), SECTION_KEYS);

    server::load(root, config, env)?;
    network::load(root, config, env)?;
    databases::load(root, config, env)?;
    logging::load(root, config, env)?;
    webserver::load(root, config, env)?;
    api::load(root, config, env)?;
    swagger::load(root, config, env)?;
    websocket::load(root, config, env)?;
    terminal::load(root, config, env)?;
    mdns_server::load(root, config, env)?;
    mdns_client::load(root, config, env)?;
    mail::load(root, config, env)?;
    print::load(root, config, env)?;
    resources::load(root, config, env)?;
    oidc::load(root, config, env)?;
    notify::load(root, config, env)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Log emission
// ---------------------------------------------------------------------------

/// Indentation for one nesting level of the provenance log.
fn indent(depth: usize) -> String {
    "—".repeat(depth)
}

/// Fetch a section object from the document. A present-but-not-object
/// value is warned about and treated as absent.
fn section_node<'a>(root: &'a Value, name: &str) -> Option<&'a Value> {
    match root.get(name) {
        Some(v) if v.is_object() => Some(v),
        Some(_) => {
            warn!(target: "config", section = name, "section is not an object; using defaults");
            None
        },
        None => None,
    }
}

/// Fetch a nested object inside a section, same tolerance as
/// [`section_node`].
fn group_node<'a>(node: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    node.and_then(|n| n.get(key)).filter(|v| v.is_object())
}

/// Emit the one header line a section gets; absent sections are marked
/// default-origin.
fn emit_header(name: &str, present: bool) {
    if present {
        info!(target: "config", "{name}");
    } else {
        info!(target: "config", "{name} *");
    }
}

/// Emit a nested group header (e.g. `PortAllocation` under `Network`).
fn emit_group(depth: usize, name: &str) {
    info!(target: "config", "{} {name}", indent(depth));
}

/// Emit one resolved string-value line.
///
/// Shape: `<indent> Key: Value[ *]` for literals and defaults,
/// `<indent> Key {VAR}: Value` for env-resolved values. Sensitive keys show
/// only the first five characters of the value.
fn emit_value<T: Display>(depth: usize, key: &str, resolved: &Resolved<T>) {
    emit_line(depth, key, resolved, None, true);
}

/// Emit a numeric or boolean value line, with an optional units suffix.
///
/// Never masked: the sensitive-name patterns (`token`, `key`, ...) also
/// match harmless numeric keys like `AccessTokenLifetime`, and masking
/// only applies to secret *strings*.
fn emit_numeric<T: Display>(depth: usize, key: &str, resolved: &Resolved<T>, units: Option<&str>) {
    emit_line(depth, key, resolved, units, false);
}

fn emit_line<T: Display>(
    depth: usize,
    key: &str,
    resolved: &Resolved<T>,
    units: Option<&str>,
    mask: bool,
) {
    let pad = indent(depth);
    let mut shown = resolved.value.to_string();
    if mask && is_sensitive_name(key) {
        shown = masked(&shown);
    }
    let units = units.map(|u| format!(" {u}")).unwrap_or_default();
    match &resolved.provenance {
        Provenance::Env(var) => {
            info!(target: "config", "{pad} {key} {{{var}}}: {shown}");
        },
        Provenance::EnvMissing(var) => {
            info!(target: "config", "{pad} {key} {{{var}}}: {shown} *");
        },
        Provenance::Config => {
            info!(target: "config", "{pad} {key}: {shown}{units}");
        },
        Provenance::Default => {
            info!(target: "config", "{pad} {key}: {shown} *{units}");
        },
    }
}

/// Warn about keys the loader does not recognize. They are ignored.
fn warn_unknown_keys(context: &str, node: Option<&Value>, known: &[&str]) {
    if let Some(Value::Object(map)) = node {
        for key in map.keys() {
            if !known.contains(&key.as_str()) {
                warn!(
                    target: "config",
                    section = context,
                    key = %key,
                    "unknown configuration key ignored"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers: resolve one key out of a section node, emit its line, and
// hand back the value. Loaders stay declarative.
// ---------------------------------------------------------------------------

fn field_string(depth: usize, key: &str, node: Option<&Value>, default: &str, env: &EnvVars) -> String {
    let r = resolve_string(key, node.and_then(|n| n.get(key)), default, env);
    emit_value(depth, key, &r);
    r.value
}

fn field_sensitive(depth: usize, key: &str, node: Option<&Value>, default: &str, env: &EnvVars) -> String {
    let r = resolve_sensitive_string(key, node.and_then(|n| n.get(key)), default, env);
    emit_value(depth, key, &r);
    r.value
}

fn field_bool(depth: usize, key: &str, node: Option<&Value>, default: bool, env: &EnvVars) -> bool {
    let r = resolve_bool(key, node.and_then(|n| n.get(key)), default, env);
    emit_numeric(depth, key, &r, None);
    r.value
}

fn field_i64(depth: usize, key: &str, node: Option<&Value>, default: i64, env: &EnvVars) -> i64 {
    let r = resolve_int_in(key, node.and_then(|n| n.get(key)), default, i64::MIN..=i64::MAX, env);
    emit_numeric(depth, key, &r, None);
    r.value
}

fn field_u64(depth: usize, key: &str, node: Option<&Value>, default: u64, env: &EnvVars) -> u64 {
    let r = resolve_size(key, node.and_then(|n| n.get(key)), default, env);
    emit_numeric(depth, key, &r, None);
    r.value
}

fn field_u64_units(
    depth: usize,
    key: &str,
    node: Option<&Value>,
    default: u64,
    units: &str,
    env: &EnvVars,
) -> u64 {
    let r = resolve_size(key, node.and_then(|n| n.get(key)), default, env);
    emit_numeric(depth, key, &r, Some(units));
    r.value
}

fn field_f64(depth: usize, key: &str, node: Option<&Value>, default: f64, env: &EnvVars) -> f64 {
    let r = resolve_double(key, node.and_then(|n| n.get(key)), default, env);
    emit_numeric(depth, key, &r, None);
    r.value
}

/// Resolve a TCP port: integer in `1..=65535`.
fn field_port(depth: usize, key: &str, node: Option<&Value>, default: u16, env: &EnvVars) -> u16 {
    let r = resolve_int_in(
        key,
        node.and_then(|n| n.get(key)),
        i64::from(default),
        1..=65535,
        env,
    );
    emit_numeric(depth, key, &r, None);
    u16::try_from(r.value).unwrap_or(default)
}

/// Resolve a log level name, constrained to the known set.
fn field_level(depth: usize, key: &str, node: Option<&Value>, default: &str, env: &EnvVars) -> String {
    let mut r = resolve_string(key, node.and_then(|n| n.get(key)), default, env);
    let lower = r.value.to_ascii_lowercase();
    if crate::types::KNOWN_LEVELS.contains(&lower.as_str()) {
        r.value = lower;
    } else {
        warn!(
            target: "config",
            key,
            value = %r.value,
            "unknown log level; using default"
        );
        r = Resolved {
            value: default.to_owned(),
            provenance: Provenance::Default,
        };
    }
    emit_value(depth, key, &r);
    r.value
}
