//! Databases section loader: connection list normalization and
//! worker-queue scaling profiles.

use serde_json::Value;
use tracing::{info, warn};

use super::{
    emit_group, emit_header, field_bool, field_port, field_sensitive, field_string, field_u64,
    group_node, indent, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{
    AppConfig, DatabaseConnection, DatabasesConfig, MAX_DATABASE_CONNECTIONS, QueueScaling,
};

const KNOWN_KEYS: &[&str] = &[
    "DefaultWorkers",
    "ConnectionCount",
    "Connections",
    "DefaultQueues",
];
const KNOWN_CONNECTION_KEYS: &[&str] = &[
    "Name",
    "Enabled",
    "Type",
    "Engine",
    "Database",
    "Host",
    "Port",
    "User",
    "Pass",
    "Workers",
    "PreparedStatementCacheSize",
];
const KNOWN_QUEUE_KEYS: &[&str] = &["Slow", "Medium", "Fast", "Cache"];
const KNOWN_SCALING_KEYS: &[&str] = &["Start", "Min", "Max"];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Databases");
    emit_header("Databases", node.is_some());
    warn_unknown_keys("Databases", node, KNOWN_KEYS);

    let d = DatabasesConfig::default();
    config.databases.default_workers = field_u64(1, "DefaultWorkers", node, d.default_workers, env);

    let connections = load_connections(
        node.and_then(|n| n.get("Connections")),
        config.databases.default_workers,
        env,
    );
    // ConnectionCount is derived from the normalized list; an explicit key
    // that disagrees is only worth a warning.
    if let Some(declared) = node.and_then(|n| n.get("ConnectionCount")).and_then(Value::as_u64) {
        if u64::try_from(connections.len()).is_ok_and(|len| len != declared) {
            warn!(
                target: "config",
                declared,
                actual = connections.len(),
                "ConnectionCount does not match the Connections list; using the list"
            );
        }
    }
    info!(target: "config", "{} ConnectionCount: {}", indent(1), connections.len());
    config.databases.connection_count = connections.len();
    config.databases.connections = connections;

    let queues = group_node(node, "DefaultQueues");
    emit_group(1, "DefaultQueues");
    warn_unknown_keys("Databases.DefaultQueues", queues, KNOWN_QUEUE_KEYS);
    let q = &mut config.databases.default_queues;
    q.slow = load_scaling(queues, "Slow", &d.default_queues.slow, env);
    q.medium = load_scaling(queues, "Medium", &d.default_queues.medium, env);
    q.fast = load_scaling(queues, "Fast", &d.default_queues.fast, env);
    q.cache = load_scaling(queues, "Cache", &d.default_queues.cache, env);
    Ok(())
}

/// Normalize the `Connections` value: either a JSON array or an object
/// keyed by connection name, capped at [`MAX_DATABASE_CONNECTIONS`].
fn load_connections(
    node: Option<&Value>,
    default_workers: u64,
    env: &EnvVars,
) -> Vec<DatabaseConnection> {
    let mut connections = Vec::new();
    match node {
        Some(Value::Array(arr)) => {
            for (index, item) in arr.iter().enumerate() {
                let fallback = format!("connection{}", index.saturating_add(1));
                connections.push(connection_from(&fallback, item, default_workers, env));
            }
        },
        Some(Value::Object(map)) => {
            for (name, item) in map {
                connections.push(connection_from(name, item, default_workers, env));
            }
        },
        Some(_) => {
            warn!(target: "config", "Databases.Connections must be an array or object; ignored");
        },
        None => {},
    }

    if connections.len() > MAX_DATABASE_CONNECTIONS {
        warn!(
            target: "config",
            configured = connections.len(),
            kept = MAX_DATABASE_CONNECTIONS,
            "too many database connections; excess entries dropped"
        );
        connections.truncate(MAX_DATABASE_CONNECTIONS);
    }
    connections
}

fn connection_from(
    fallback_name: &str,
    item: &Value,
    default_workers: u64,
    env: &EnvVars,
) -> DatabaseConnection {
    let node = item.is_object().then_some(item);
    warn_unknown_keys("Databases.Connections", node, KNOWN_CONNECTION_KEYS);

    let d = DatabaseConnection::default();
    let name = field_string(1, "Name", node, fallback_name, env);
    // The engine may be spelled `Type` or `Engine`; `Type` wins.
    let engine_node = node.and_then(|n| n.get("Type").or_else(|| n.get("Engine")));
    let engine = crate::resolve::resolve_string("Type", engine_node, &d.engine, env);
    super::emit_value(2, "Type", &engine);

    DatabaseConnection {
        name,
        enabled: field_bool(2, "Enabled", node, d.enabled, env),
        engine: engine.value,
        database: field_string(2, "Database", node, &d.database, env),
        host: field_string(2, "Host", node, &d.host, env),
        port: field_port(2, "Port", node, d.port, env),
        user: field_string(2, "User", node, &d.user, env),
        pass: field_sensitive(2, "Pass", node, &d.pass, env),
        workers: field_u64(2, "Workers", node, default_workers, env),
        prepared_statement_cache_size: field_u64(
            2,
            "PreparedStatementCacheSize",
            node,
            d.prepared_statement_cache_size,
            env,
        ),
    }
}

fn load_scaling(
    queues: Option<&Value>,
    key: &str,
    defaults: &QueueScaling,
    env: &EnvVars,
) -> QueueScaling {
    let node = group_node(queues, key);
    emit_group(2, key);
    warn_unknown_keys("Databases.DefaultQueues", node, KNOWN_SCALING_KEYS);
    QueueScaling {
        start_workers: field_u64(3, "Start", node, defaults.start_workers, env),
        min_workers: field_u64(3, "Min", node, defaults.min_workers, env),
        max_workers: field_u64(3, "Max", node, defaults.max_workers, env),
    }
}
