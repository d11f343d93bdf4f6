//! Server section loader: identity, log file, payload key.

use serde_json::Value;

use super::{
    emit_header, field_sensitive, field_string, field_u64_units, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, ServerConfig};

const KNOWN_KEYS: &[&str] = &["ServerName", "LogFile", "PayloadKey", "StartupDelay"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Server");
    emit_header("Server", node.is_some());
    warn_unknown_keys("Server", node, KNOWN_KEYS);

    let d = ServerConfig::default();
    let c = &mut config.server;
    c.server_name = field_string(1, "ServerName", node, &d.server_name, env);
    c.log_file = field_string(1, "LogFile", node, &d.log_file, env);
    c.payload_key = field_sensitive(1, "PayloadKey", node, &d.payload_key, env);
    c.startup_delay_ms = field_u64_units(1, "StartupDelay", node, d.startup_delay_ms, "ms", env);
    Ok(())
}
