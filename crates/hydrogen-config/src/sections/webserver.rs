//! WebServer section loader.

use serde_json::Value;

use super::{
    emit_header, field_bool, field_port, field_string, field_u64, field_u64_units, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, WebServerConfig};

const KNOWN_KEYS: &[&str] = &[
    "EnableIPv4",
    "EnableIPv6",
    "Port",
    "WebRoot",
    "UploadPath",
    "UploadDir",
    "MaxUploadSize",
    "ThreadPoolSize",
    "MaxConnections",
    "MaxConnectionsPerIP",
    "ConnectionTimeout",
    "CORSOrigin",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "WebServer");
    emit_header("WebServer", node.is_some());
    warn_unknown_keys("WebServer", node, KNOWN_KEYS);

    let d = WebServerConfig::default();
    let c = &mut config.webserver;
    c.enable_ipv4 = field_bool(1, "EnableIPv4", node, d.enable_ipv4, env);
    c.enable_ipv6 = field_bool(1, "EnableIPv6", node, d.enable_ipv6, env);
    c.port = field_port(1, "Port", node, d.port, env);
    c.web_root = field_string(1, "WebRoot", node, &d.web_root, env);
    c.upload_path = field_string(1, "UploadPath", node, &d.upload_path, env);
    c.upload_dir = field_string(1, "UploadDir", node, &d.upload_dir, env);
    c.max_upload_size = field_u64(1, "MaxUploadSize", node, d.max_upload_size, env);
    c.thread_pool_size = field_u64(1, "ThreadPoolSize", node, d.thread_pool_size, env);
    c.max_connections = field_u64(1, "MaxConnections", node, d.max_connections, env);
    c.max_connections_per_ip = field_u64(1, "MaxConnectionsPerIP", node, d.max_connections_per_ip, env);
    c.connection_timeout_secs =
        field_u64_units(1, "ConnectionTimeout", node, d.connection_timeout_secs, "seconds", env);
    c.cors_origin = field_string(1, "CORSOrigin", node, &d.cors_origin, env);
    Ok(())
}
