//! mDNSServer section loader: advertised identity and service list.

use serde_json::Value;
use tracing::{info, warn};

use super::{
    emit_group, emit_header, field_bool, field_string, field_u64, indent, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::{EnvVars, resolve_string};
use crate::types::{AppConfig, MdnsServerConfig, MdnsService};

const KNOWN_KEYS: &[&str] = &[
    "EnableIPv4",
    "EnableIPv6",
    "DeviceId",
    "FriendlyName",
    "Model",
    "Manufacturer",
    "Version",
    "RetryCount",
    "Services",
];
const KNOWN_SERVICE_KEYS: &[&str] = &["Name", "Type", "Port", "TxtRecords"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "mDNSServer");
    emit_header("mDNSServer", node.is_some());
    warn_unknown_keys("mDNSServer", node, KNOWN_KEYS);

    let d = MdnsServerConfig::default();
    let c = &mut config.mdns_server;
    c.enable_ipv4 = field_bool(1, "EnableIPv4", node, d.enable_ipv4, env);
    c.enable_ipv6 = field_bool(1, "EnableIPv6", node, d.enable_ipv6, env);
    c.device_id = field_string(1, "DeviceId", node, &d.device_id, env);
    c.friendly_name = field_string(1, "FriendlyName", node, &d.friendly_name, env);
    c.model = field_string(1, "Model", node, &d.model, env);
    c.manufacturer = field_string(1, "Manufacturer", node, &d.manufacturer, env);
    c.version = field_string(1, "Version", node, &d.version, env);
    c.retry_count = field_u64(1, "RetryCount", node, d.retry_count, env);
    c.services = load_services(node.and_then(|n| n.get("Services")), env);
    Ok(())
}

/// Load the advertised service list. Entries missing a name, type, or
/// usable port are dropped with a warning.
fn load_services(node: Option<&Value>, env: &EnvVars) -> Vec<MdnsService> {
    emit_group(1, "Services");
    let Some(arr) = node.and_then(Value::as_array) else {
        if node.is_some() {
            warn!(target: "config", "mDNSServer.Services must be an array; ignored");
        }
        return Vec::new();
    };

    let mut services = Vec::with_capacity(arr.len());
    for item in arr {
        warn_unknown_keys("mDNSServer.Services", item.is_object().then_some(item), KNOWN_SERVICE_KEYS);

        let name = resolve_string("Name", item.get("Name"), "", env).value;
        let service_type = resolve_string("Type", item.get("Type"), "", env).value;
        let port = item.get("Port").and_then(Value::as_i64).and_then(|i| u16::try_from(i).ok());
        let Some(port) = port else {
            warn!(target: "config", name = %name, "mDNS service entry has no valid Port; entry dropped");
            continue;
        };
        if name.is_empty() || service_type.is_empty() {
            warn!(target: "config", "mDNS service entry needs Name and Type; entry dropped");
            continue;
        }

        let txt_records = load_txt_records(item.get("TxtRecords"), env);
        info!(
            target: "config",
            "{} Service: {name} ({service_type}) port {port}, {} txt",
            indent(2),
            txt_records.len()
        );
        services.push(MdnsService {
            name,
            service_type,
            port,
            txt_records,
        });
    }
    services
}

/// TXT records accept a single string or an array of strings.
fn load_txt_records(node: Option<&Value>, env: &EnvVars) -> Vec<String> {
    match node {
        Some(Value::String(_)) => {
            vec![resolve_string("TxtRecords", node, "", env).value]
        },
        Some(Value::Array(arr)) => arr
            .iter()
            .filter(|v| v.is_string())
            .map(|v| resolve_string("TxtRecords", Some(v), "", env).value)
            .collect(),
        _ => Vec::new(),
    }
}
