//! API section loader.

use serde_json::Value;

use super::{emit_header, field_bool, field_sensitive, field_string, section_node, warn_unknown_keys};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{ApiConfig, AppConfig};

const KNOWN_KEYS: &[&str] = &["Enabled", "Prefix", "JWTSecret", "CORSOrigin"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "API");
    emit_header("API", node.is_some());
    warn_unknown_keys("API", node, KNOWN_KEYS);

    let d = ApiConfig::default();
    let c = &mut config.api;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.prefix = field_string(1, "Prefix", node, &d.prefix, env);
    c.jwt_secret = field_sensitive(1, "JWTSecret", node, &d.jwt_secret, env);
    c.cors_origin = field_string(1, "CORSOrigin", node, &d.cors_origin, env);
    Ok(())
}
