//! Notify section loader: notifier selection and SMTP backend.

use serde_json::Value;
use tracing::warn;

use super::{
    emit_group, emit_header, field_bool, field_port, field_sensitive, field_string, field_u64,
    field_u64_units, group_node, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, NotifyConfig};

const KNOWN_KEYS: &[&str] = &["Enabled", "Notifier", "SMTP"];
const KNOWN_SMTP_KEYS: &[&str] = &[
    "Host",
    "Port",
    "Username",
    "Password",
    "UseTLS",
    "Timeout",
    "MaxRetries",
    "FromAddress",
];
const KNOWN_NOTIFIERS: &[&str] = &["none", "smtp"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Notify");
    emit_header("Notify", node.is_some());
    warn_unknown_keys("Notify", node, KNOWN_KEYS);

    let d = NotifyConfig::default();
    let c = &mut config.notify;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.notifier = field_string(1, "Notifier", node, &d.notifier, env);
    if !KNOWN_NOTIFIERS.contains(&c.notifier.as_str()) {
        warn!(
            target: "config",
            notifier = %c.notifier,
            "unknown notifier backend; using default"
        );
        c.notifier.clone_from(&d.notifier);
    }

    let smtp = group_node(node, "SMTP");
    emit_group(1, "SMTP");
    warn_unknown_keys("Notify.SMTP", smtp, KNOWN_SMTP_KEYS);
    let s = &mut c.smtp;
    s.host = field_string(2, "Host", smtp, &d.smtp.host, env);
    s.port = field_port(2, "Port", smtp, d.smtp.port, env);
    s.username = field_string(2, "Username", smtp, &d.smtp.username, env);
    s.password = field_sensitive(2, "Password", smtp, &d.smtp.password, env);
    s.use_tls = field_bool(2, "UseTLS", smtp, d.smtp.use_tls, env);
    s.timeout_secs = field_u64_units(2, "Timeout", smtp, d.smtp.timeout_secs, "seconds", env);
    s.max_retries = field_u64(2, "MaxRetries", smtp, d.smtp.max_retries, env);
    s.from_address = field_string(2, "FromAddress", smtp, &d.smtp.from_address, env);
    Ok(())
}
