//! WebSocket section loader.

use serde_json::Value;

use super::{
    emit_group, emit_header, emit_numeric, field_bool, field_port, field_sensitive, field_string,
    field_u64, group_node, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::{EnvVars, resolve_int_in};
use crate::types::{AppConfig, WebSocketConfig};

const KNOWN_KEYS: &[&str] = &[
    "EnableIPv4",
    "EnableIPv6",
    "LibLogLevel",
    "Port",
    "Protocol",
    "Key",
    "MaxMessageSize",
    "ConnectionTimeouts",
];
const KNOWN_TIMEOUT_KEYS: &[&str] = &[
    "ShutdownWaitSeconds",
    "ServiceLoopDelayMs",
    "ConnectionCleanupMs",
    "ExitWaitSeconds",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "WebSocket");
    emit_header("WebSocket", node.is_some());
    warn_unknown_keys("WebSocket", node, KNOWN_KEYS);

    let d = WebSocketConfig::default();
    let c = &mut config.websocket;
    c.enable_ipv4 = field_bool(1, "EnableIPv4", node, d.enable_ipv4, env);
    c.enable_ipv6 = field_bool(1, "EnableIPv6", node, d.enable_ipv6, env);

    let lib_level = resolve_int_in(
        "LibLogLevel",
        node.and_then(|n| n.get("LibLogLevel")),
        i64::from(d.lib_log_level),
        0..=11,
        env,
    );
    emit_numeric(1, "LibLogLevel", &lib_level, None);
    c.lib_log_level = u8::try_from(lib_level.value).unwrap_or(d.lib_log_level);

    c.port = field_port(1, "Port", node, d.port, env);
    c.protocol = field_string(1, "Protocol", node, &d.protocol, env);
    c.key = field_sensitive(1, "Key", node, &d.key, env);
    c.max_message_size = field_u64(1, "MaxMessageSize", node, d.max_message_size, env);

    let timeouts = group_node(node, "ConnectionTimeouts");
    emit_group(1, "ConnectionTimeouts");
    warn_unknown_keys("WebSocket.ConnectionTimeouts", timeouts, KNOWN_TIMEOUT_KEYS);
    let t = &mut c.connection_timeouts;
    t.shutdown_wait_seconds = field_u64(
        2,
        "ShutdownWaitSeconds",
        timeouts,
        d.connection_timeouts.shutdown_wait_seconds,
        env,
    );
    t.service_loop_delay_ms = field_u64(
        2,
        "ServiceLoopDelayMs",
        timeouts,
        d.connection_timeouts.service_loop_delay_ms,
        env,
    );
    t.connection_cleanup_ms = field_u64(
        2,
        "ConnectionCleanupMs",
        timeouts,
        d.connection_timeouts.connection_cleanup_ms,
        env,
    );
    t.exit_wait_seconds = field_u64(
        2,
        "ExitWaitSeconds",
        timeouts,
        d.connection_timeouts.exit_wait_seconds,
        env,
    );
    Ok(())
}
