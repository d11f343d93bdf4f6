//! Network section loader: interface limits, port allocation,
//! interface availability.

use serde_json::Value;
use tracing::{error, info, warn};

use super::{
    emit_group, emit_header, field_port, field_u64, group_node, indent, section_node,
    warn_unknown_keys,
};
use crate::error::{ConfigError, ConfigResult};
use crate::resolve::EnvVars;
use crate::types::{AppConfig, InterfaceAvailability, NetworkConfig};

const KNOWN_KEYS: &[&str] = &["Interfaces", "PortAllocation", "Available"];
const KNOWN_INTERFACE_KEYS: &[&str] = &[
    "MaxInterfaces",
    "MaxIPsPerInterface",
    "MaxInterfaceNameLength",
    "MaxIPAddressLength",
];
const KNOWN_PORT_KEYS: &[&str] = &["StartPort", "EndPort", "ReservedPorts"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Network");
    emit_header("Network", node.is_some());
    warn_unknown_keys("Network", node, KNOWN_KEYS);

    let d = NetworkConfig::default();

    let limits = group_node(node, "Interfaces");
    emit_group(1, "Interfaces");
    warn_unknown_keys("Network.Interfaces", limits, KNOWN_INTERFACE_KEYS);
    let l = &mut config.network.interfaces;
    l.max_interfaces = field_u64(2, "MaxInterfaces", limits, d.interfaces.max_interfaces, env);
    l.max_ips_per_interface = field_u64(
        2,
        "MaxIPsPerInterface",
        limits,
        d.interfaces.max_ips_per_interface,
        env,
    );
    l.max_interface_name_length = field_u64(
        2,
        "MaxInterfaceNameLength",
        limits,
        d.interfaces.max_interface_name_length,
        env,
    );
    l.max_ip_address_length = field_u64(
        2,
        "MaxIPAddressLength",
        limits,
        d.interfaces.max_ip_address_length,
        env,
    );

    let ports = group_node(node, "PortAllocation");
    emit_group(1, "PortAllocation");
    warn_unknown_keys("Network.PortAllocation", ports, KNOWN_PORT_KEYS);
    let start = field_port(2, "StartPort", ports, d.port_allocation.start_port, env);
    let end = field_port(2, "EndPort", ports, d.port_allocation.end_port, env);
    if start > end {
        return Err(ConfigError::Section {
            section: "Network",
            message: format!("StartPort {start} exceeds EndPort {end}"),
        });
    }
    config.network.port_allocation.start_port = start;
    config.network.port_allocation.end_port = end;
    config.network.port_allocation.reserved_ports = load_reserved_ports(ports, start, end)?;

    config.network.available = load_available(node.and_then(|n| n.get("Available")));
    Ok(())
}

/// Load the reserved-port list: integers within the allocation range,
/// insertion order preserved. An out-of-range or non-integer element is
/// dropped with an ERROR; a duplicate rejects the whole section.
fn load_reserved_ports(ports: Option<&Value>, start: u16, end: u16) -> ConfigResult<Vec<u16>> {
    let Some(arr) = ports.and_then(|p| p.get("ReservedPorts")).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut reserved = Vec::with_capacity(arr.len());
    for item in arr {
        let Some(port) = item.as_i64().and_then(|i| u16::try_from(i).ok()) else {
            error!(
                target: "config",
                value = %item,
                "ReservedPorts entries must be integers; entry dropped"
            );
            continue;
        };
        if !(start..=end).contains(&port) {
            error!(
                target: "config",
                port,
                start,
                end,
                "reserved port outside the allocation range; entry dropped"
            );
            continue;
        }
        if reserved.contains(&port) {
            return Err(ConfigError::Section {
                section: "Network",
                message: format!("duplicate reserved port {port}"),
            });
        }
        info!(target: "config", "{} ReservedPorts[]: {port}", indent(2));
        reserved.push(port);
    }
    Ok(reserved)
}

/// Load the interface availability map into a name-sorted list. An absent
/// map synthesises the single `all: true` entry.
fn load_available(node: Option<&Value>) -> Vec<InterfaceAvailability> {
    emit_group(1, "Available");
    match node {
        Some(Value::Object(map)) => {
            let mut list: Vec<InterfaceAvailability> = map
                .iter()
                .filter_map(|(name, v)| match v.as_bool() {
                    Some(available) => Some(InterfaceAvailability {
                        name: name.clone(),
                        available,
                    }),
                    None => {
                        warn!(
                            target: "config",
                            interface = %name,
                            "interface availability must be a boolean; entry ignored"
                        );
                        None
                    },
                })
                .collect();
            list.sort_by(|a, b| a.name.cmp(&b.name));
            for entry in &list {
                info!(target: "config", "{} {}: {}", indent(2), entry.name, entry.available);
            }
            list
        },
        Some(_) => {
            warn!(target: "config", "Network.Available must be an object; using defaults");
            synthesised_all()
        },
        None => synthesised_all(),
    }
}

fn synthesised_all() -> Vec<InterfaceAvailability> {
    info!(target: "config", "{} all: true *", indent(2));
    vec![InterfaceAvailability {
        name: "all".to_owned(),
        available: true,
    }]
}
