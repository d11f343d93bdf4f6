//! Terminal section loader.

use serde_json::Value;

use super::{
    emit_header, field_bool, field_string, field_u64, field_u64_units, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, TerminalConfig};

const KNOWN_KEYS: &[&str] = &[
    "Enabled",
    "WebPath",
    "ShellCommand",
    "MaxSessions",
    "IdleTimeoutSeconds",
    "BufferSize",
    "WebRoot",
    "CORSOrigin",
    "IndexPage",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Terminal");
    emit_header("Terminal", node.is_some());
    warn_unknown_keys("Terminal", node, KNOWN_KEYS);

    let d = TerminalConfig::default();
    let c = &mut config.terminal;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.web_path = field_string(1, "WebPath", node, &d.web_path, env);
    c.shell_command = field_string(1, "ShellCommand", node, &d.shell_command, env);
    c.max_sessions = field_u64(1, "MaxSessions", node, d.max_sessions, env);
    c.idle_timeout_seconds =
        field_u64_units(1, "IdleTimeoutSeconds", node, d.idle_timeout_seconds, "seconds", env);
    c.buffer_size = field_u64(1, "BufferSize", node, d.buffer_size, env);
    c.web_root = field_string(1, "WebRoot", node, &d.web_root, env);
    c.cors_origin = field_string(1, "CORSOrigin", node, &d.cors_origin, env);
    c.index_page = field_string(1, "IndexPage", node, &d.index_page, env);
    Ok(())
}
