//! OIDC section loader: issuer identity, endpoints, key material,
//! token policy.

use serde_json::Value;

use super::{
    emit_group, emit_header, field_bool, field_port, field_sensitive, field_string,
    field_u64_units, group_node, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, OidcConfig};

const KNOWN_KEYS: &[&str] = &[
    "Enabled",
    "Issuer",
    "ClientId",
    "ClientSecret",
    "RedirectUri",
    "Port",
    "AuthMethod",
    "Scope",
    "VerifySSL",
    "Endpoints",
    "Keys",
    "Tokens",
];
const KNOWN_ENDPOINT_KEYS: &[&str] = &[
    "Authorization",
    "Token",
    "UserInfo",
    "JWKS",
    "EndSession",
    "Introspection",
    "Revocation",
    "Registration",
];
const KNOWN_KEY_KEYS: &[&str] = &[
    "SigningKey",
    "EncryptionKey",
    "JWKSUri",
    "StoragePath",
    "EncryptionEnabled",
    "RotationIntervalDays",
];
const KNOWN_TOKEN_KEYS: &[&str] = &[
    "AccessTokenLifetime",
    "RefreshTokenLifetime",
    "IdTokenLifetime",
    "SigningAlg",
    "EncryptionAlg",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "OIDC");
    emit_header("OIDC", node.is_some());
    warn_unknown_keys("OIDC", node, KNOWN_KEYS);

    let d = OidcConfig::default();
    let c = &mut config.oidc;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.issuer = field_string(1, "Issuer", node, &d.issuer, env);
    c.client_id = field_string(1, "ClientId", node, &d.client_id, env);
    c.client_secret = field_sensitive(1, "ClientSecret", node, &d.client_secret, env);
    c.redirect_uri = field_string(1, "RedirectUri", node, &d.redirect_uri, env);
    c.port = field_port(1, "Port", node, d.port, env);
    c.auth_method = field_string(1, "AuthMethod", node, &d.auth_method, env);
    c.scope = field_string(1, "Scope", node, &d.scope, env);
    c.verify_ssl = field_bool(1, "VerifySSL", node, d.verify_ssl, env);

    let endpoints = group_node(node, "Endpoints");
    emit_group(1, "Endpoints");
    warn_unknown_keys("OIDC.Endpoints", endpoints, KNOWN_ENDPOINT_KEYS);
    let e = &mut c.endpoints;
    e.authorization = field_string(2, "Authorization", endpoints, &d.endpoints.authorization, env);
    e.token = field_string(2, "Token", endpoints, &d.endpoints.token, env);
    e.userinfo = field_string(2, "UserInfo", endpoints, &d.endpoints.userinfo, env);
    e.jwks = field_string(2, "JWKS", endpoints, &d.endpoints.jwks, env);
    e.end_session = field_string(2, "EndSession", endpoints, &d.endpoints.end_session, env);
    e.introspection = field_string(2, "Introspection", endpoints, &d.endpoints.introspection, env);
    e.revocation = field_string(2, "Revocation", endpoints, &d.endpoints.revocation, env);
    e.registration = field_string(2, "Registration", endpoints, &d.endpoints.registration, env);

    let keys = group_node(node, "Keys");
    emit_group(1, "Keys");
    warn_unknown_keys("OIDC.Keys", keys, KNOWN_KEY_KEYS);
    let k = &mut c.keys;
    k.signing_key = field_sensitive(2, "SigningKey", keys, &d.keys.signing_key, env);
    k.encryption_key = field_sensitive(2, "EncryptionKey", keys, &d.keys.encryption_key, env);
    k.jwks_uri = field_string(2, "JWKSUri", keys, &d.keys.jwks_uri, env);
    k.storage_path = field_string(2, "StoragePath", keys, &d.keys.storage_path, env);
    k.encryption_enabled = field_bool(2, "EncryptionEnabled", keys, d.keys.encryption_enabled, env);
    k.rotation_interval_days = field_u64_units(
        2,
        "RotationIntervalDays",
        keys,
        d.keys.rotation_interval_days,
        "days",
        env,
    );

    let tokens = group_node(node, "Tokens");
    emit_group(1, "Tokens");
    warn_unknown_keys("OIDC.Tokens", tokens, KNOWN_TOKEN_KEYS);
    let t = &mut c.tokens;
    t.access_token_lifetime_secs = field_u64_units(
        2,
        "AccessTokenLifetime",
        tokens,
        d.tokens.access_token_lifetime_secs,
        "seconds",
        env,
    );
    t.refresh_token_lifetime_secs = field_u64_units(
        2,
        "RefreshTokenLifetime",
        tokens,
        d.tokens.refresh_token_lifetime_secs,
        "seconds",
        env,
    );
    t.id_token_lifetime_secs = field_u64_units(
        2,
        "IdTokenLifetime",
        tokens,
        d.tokens.id_token_lifetime_secs,
        "seconds",
        env,
    );
    t.signing_alg = field_string(2, "SigningAlg", tokens, &d.tokens.signing_alg, env);
    t.encryption_alg = field_string(2, "EncryptionAlg", tokens, &d.tokens.encryption_alg, env);
    Ok(())
}
