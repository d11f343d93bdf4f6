//! MailRelay section loader: listen port, queue policy, outbound
//! servers.

use serde_json::Value;
use tracing::warn;

use super::{
    emit_group, emit_header, field_bool, field_port, field_sensitive, field_string, field_u64,
    field_u64_units, group_node, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, MailRelayConfig, SmtpOutboundServer};

const KNOWN_KEYS: &[&str] = &["Enabled", "ListenPort", "Workers", "Queue", "Servers"];
const KNOWN_QUEUE_KEYS: &[&str] = &["MaxQueueSize", "RetryAttempts", "RetryDelaySeconds"];
const KNOWN_SERVER_KEYS: &[&str] = &["Host", "Port", "Username", "Password", "UseTLS"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "MailRelay");
    emit_header("MailRelay", node.is_some());
    warn_unknown_keys("MailRelay", node, KNOWN_KEYS);

    let d = MailRelayConfig::default();
    let c = &mut config.mail_relay;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.listen_port = field_port(1, "ListenPort", node, d.listen_port, env);
    c.workers = field_u64(1, "Workers", node, d.workers, env);

    let queue = group_node(node, "Queue");
    emit_group(1, "Queue");
    warn_unknown_keys("MailRelay.Queue", queue, KNOWN_QUEUE_KEYS);
    c.queue.max_queue_size = field_u64(2, "MaxQueueSize", queue, d.queue.max_queue_size, env);
    c.queue.retry_attempts = field_u64(2, "RetryAttempts", queue, d.queue.retry_attempts, env);
    c.queue.retry_delay_seconds = field_u64_units(
        2,
        "RetryDelaySeconds",
        queue,
        d.queue.retry_delay_seconds,
        "seconds",
        env,
    );

    c.servers = load_servers(node.and_then(|n| n.get("Servers")), env);
    Ok(())
}

/// Load the outbound server list. An entry without a host is dropped.
fn load_servers(node: Option<&Value>, env: &EnvVars) -> Vec<SmtpOutboundServer> {
    emit_group(1, "Servers");
    let Some(arr) = node.and_then(Value::as_array) else {
        if node.is_some() {
            warn!(target: "config", "MailRelay.Servers must be an array; ignored");
        }
        return Vec::new();
    };

    let mut servers = Vec::with_capacity(arr.len());
    for item in arr {
        let entry = item.is_object().then_some(item);
        warn_unknown_keys("MailRelay.Servers", entry, KNOWN_SERVER_KEYS);

        let d = SmtpOutboundServer::default();
        let host = field_string(2, "Host", entry, &d.host, env);
        if host.is_empty() {
            warn!(target: "config", "outbound SMTP server has no Host; entry dropped");
            continue;
        }
        servers.push(SmtpOutboundServer {
            host,
            port: field_port(2, "Port", entry, d.port, env),
            username: field_string(2, "Username", entry, &d.username, env),
            password: field_sensitive(2, "Password", entry, &d.password, env),
            use_tls: field_bool(2, "UseTLS", entry, d.use_tls, env),
        });
    }
    servers
}
