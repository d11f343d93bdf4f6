//! mDNSClient section loader: scan cadence and watched service types.

use serde_json::Value;
use tracing::{info, warn};

use super::{
    emit_group, emit_header, field_bool, field_u64, field_u64_units, indent, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::{EnvVars, resolve_string};
use crate::types::{AppConfig, MdnsClientConfig};

const KNOWN_KEYS: &[&str] = &[
    "EnableIPv4",
    "EnableIPv6",
    "ScanInterval",
    "MaxServices",
    "RetryCount",
    "HealthCheckEnabled",
    "HealthCheckInterval",
    "ServiceTypes",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "mDNSClient");
    emit_header("mDNSClient", node.is_some());
    warn_unknown_keys("mDNSClient", node, KNOWN_KEYS);

    let d = MdnsClientConfig::default();
    let c = &mut config.mdns_client;
    c.enable_ipv4 = field_bool(1, "EnableIPv4", node, d.enable_ipv4, env);
    c.enable_ipv6 = field_bool(1, "EnableIPv6", node, d.enable_ipv6, env);
    c.scan_interval_secs =
        field_u64_units(1, "ScanInterval", node, d.scan_interval_secs, "seconds", env);
    c.max_services = field_u64(1, "MaxServices", node, d.max_services, env);
    c.retry_count = field_u64(1, "RetryCount", node, d.retry_count, env);
    c.health_check_enabled = field_bool(1, "HealthCheckEnabled", node, d.health_check_enabled, env);
    c.health_check_interval_secs = field_u64_units(
        1,
        "HealthCheckInterval",
        node,
        d.health_check_interval_secs,
        "seconds",
        env,
    );
    c.service_types = load_service_types(node.and_then(|n| n.get("ServiceTypes")), env);
    Ok(())
}

fn load_service_types(node: Option<&Value>, env: &EnvVars) -> Vec<String> {
    emit_group(1, "ServiceTypes");
    let Some(arr) = node.and_then(Value::as_array) else {
        if node.is_some() {
            warn!(target: "config", "mDNSClient.ServiceTypes must be an array; ignored");
        }
        return Vec::new();
    };

    let mut types = Vec::with_capacity(arr.len());
    for item in arr {
        if item.is_string() {
            let value = resolve_string("ServiceTypes", Some(item), "", env).value;
            if !value.is_empty() {
                info!(target: "config", "{} ServiceTypes[]: {value}", indent(2));
                types.push(value);
            }
        } else {
            warn!(target: "config", value = %item, "service type must be a string; entry dropped");
        }
    }
    types
}
