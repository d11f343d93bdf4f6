//! End-to-end configuration loading scenarios.

use std::collections::HashMap;

use hydrogen_config::{
    ConfigError, EnvVars, load_config, load_config_from_str, masked,
};

fn env_of(pairs: &[(&str, &str)]) -> EnvVars {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn test_all_defaults_launch() {
    let config = load_config_from_str("{}", &HashMap::new()).unwrap();

    assert_eq!(config.webserver.port, 5000);
    assert_eq!(config.websocket.port, 5001);
    assert!(config.terminal.enabled);
    assert_eq!(config.databases.connection_count, 0);

    // Every resolved string is a literal default, never a reference token.
    assert_eq!(config.server.server_name, "hydrogen");
    assert_eq!(config.api.jwt_secret, "hydrogen-api-secret");
    assert!(!config.api.jwt_secret.contains("${env."));

    // Console logging is the only destination on by default.
    assert!(config.logging.console.enabled);
    assert!(!config.logging.file.enabled);

    // Absent Available map synthesises the single "all" entry.
    assert_eq!(config.network.available.len(), 1);
    assert_eq!(config.network.available[0].name, "all");
    assert!(config.network.available[0].available);
}

#[test]
fn test_env_resolved_secret() {
    let json = r#"{ "API": { "JWTSecret": "${env.JWT_SECRET}" } }"#;
    let env = env_of(&[("JWT_SECRET", "abcdef123456")]);

    let config = load_config_from_str(json, &env).unwrap();
    assert_eq!(config.api.jwt_secret, "abcdef123456");
    // The log line shows only the first five characters.
    assert_eq!(masked(&config.api.jwt_secret), "abcde...");
}

#[test]
fn test_env_missing_uses_compiled_default() {
    let json = r#"{ "API": { "JWTSecret": "${env.JWT_SECRET}" } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.api.jwt_secret, "hydrogen-api-secret");
}

#[test]
fn test_reserved_ports_accepted_within_range() {
    let json = r#"{
        "Network": {
            "PortAllocation": {
                "StartPort": 1024,
                "EndPort": 2048,
                "ReservedPorts": [1024, 2048, 1500]
            }
        }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.network.port_allocation.reserved_ports, vec![1024, 2048, 1500]);
}

#[test]
fn test_duplicate_reserved_port_fails_the_load() {
    let json = r#"{
        "Network": {
            "PortAllocation": {
                "StartPort": 1024,
                "EndPort": 2048,
                "ReservedPorts": [1024, 2048, 1500, 1500]
            }
        }
    }"#;
    let result = load_config_from_str(json, &HashMap::new());
    assert!(matches!(result, Err(ConfigError::Section { section: "Network", .. })));
}

#[test]
fn test_out_of_range_reserved_port_is_dropped() {
    let json = r#"{
        "Network": {
            "PortAllocation": {
                "StartPort": 1024,
                "EndPort": 2048,
                "ReservedPorts": [1023, 1500]
            }
        }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.network.port_allocation.reserved_ports, vec![1500]);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let json = r#"{
        "NotASection": { "x": 1 },
        "Server": { "ServerName": "deuterium", "NotAKey": true }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.server.server_name, "deuterium");
}

#[test]
fn test_interfaces_sorted_by_name() {
    let json = r#"{
        "Network": {
            "Available": { "wlan0": false, "eth0": true, "lo": true }
        }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    let names: Vec<&str> = config.network.available.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["eth0", "lo", "wlan0"]);
    assert!(config.network.available[0].available);
    assert!(!config.network.available[2].available);
}

#[test]
fn test_connections_array_and_object_normalize_identically() {
    let array_form = r#"{
        "Databases": {
            "Connections": [
                { "Name": "main", "Type": "postgres", "Database": "hydrogen",
                  "Host": "db.local", "Port": 5433, "User": "hy", "Pass": "s3cret" }
            ]
        }
    }"#;
    let object_form = r#"{
        "Databases": {
            "Connections": {
                "main": { "Engine": "postgres", "Database": "hydrogen",
                          "Host": "db.local", "Port": 5433, "User": "hy", "Pass": "s3cret" }
            }
        }
    }"#;

    let a = load_config_from_str(array_form, &HashMap::new()).unwrap();
    let b = load_config_from_str(object_form, &HashMap::new()).unwrap();

    assert_eq!(a.databases.connection_count, 1);
    assert_eq!(b.databases.connection_count, 1);
    let (ca, cb) = (&a.databases.connections[0], &b.databases.connections[0]);
    assert_eq!(ca.name, cb.name);
    assert_eq!(ca.engine, cb.engine);
    assert_eq!(ca.host, cb.host);
    assert_eq!(ca.port, cb.port);
    assert_eq!(ca.pass, cb.pass);
}

#[test]
fn test_connections_capped_at_five() {
    let json = r#"{
        "Databases": {
            "Connections": [
                { "Database": "a" }, { "Database": "b" }, { "Database": "c" },
                { "Database": "d" }, { "Database": "e" }, { "Database": "f" }
            ]
        }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.databases.connection_count, 5);
    assert_eq!(config.databases.connections.last().unwrap().database, "e");
}

#[test]
fn test_mdns_txt_records_string_or_array() {
    let json = r#"{
        "mDNSServer": {
            "Services": [
                { "Name": "web", "Type": "_http._tcp", "Port": 5000, "TxtRecords": "path=/" },
                { "Name": "ws", "Type": "_ws._tcp", "Port": 5001,
                  "TxtRecords": ["proto=hydrogen", "v=1"] }
            ]
        }
    }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.mdns_server.services.len(), 2);
    assert_eq!(config.mdns_server.services[0].txt_records, vec!["path=/"]);
    assert_eq!(config.mdns_server.services[1].txt_records, vec!["proto=hydrogen", "v=1"]);
}

#[test]
fn test_port_bounds_enforced() {
    // 0 is outside 1..=65535; the default (5000) is kept.
    let json = r#"{ "WebServer": { "Port": 0 } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.webserver.port, 5000);

    let json = r#"{ "WebServer": { "Port": 65535 } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.webserver.port, 65535);
}

#[test]
fn test_out_of_range_value_falls_back_per_field() {
    // A bad value only affects its own field; the rest of the section loads.
    let json = r#"{ "WebServer": { "Port": 99999, "WebRoot": "/srv/www" } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    assert_eq!(config.webserver.port, 5000);
    assert_eq!(config.webserver.web_root, "/srv/www");
}

#[test]
fn test_start_port_above_end_port_rejected() {
    let json = r#"{
        "Network": { "PortAllocation": { "StartPort": 4000, "EndPort": 2000 } }
    }"#;
    let result = load_config_from_str(json, &HashMap::new());
    assert!(matches!(result, Err(ConfigError::Section { section: "Network", .. })));
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hydrogen.json");
    std::fs::write(&path, r#"{ "Server": { "ServerName": "from-file" } }"#).unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.server.server_name, "from-file");
    assert!(hydrogen_config::current_config().is_some());
}

#[test]
fn test_no_source_at_all_yields_defaults() {
    // No HYDROGEN_CONFIG, no argument, no default path readable from the
    // test working directory: the loader proceeds with every default.
    let config = load_config(None).unwrap();
    assert_eq!(config.webserver.port, 5000);
    assert_eq!(config.websocket.port, 5001);
    assert!(config.terminal.enabled);
    assert_eq!(config.databases.connection_count, 0);
}

#[test]
fn test_explicit_missing_file_is_fatal() {
    let result = load_config(Some(std::path::Path::new("/nonexistent/hydrogen.json")));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_explicit_malformed_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_env_reference_in_nested_section() {
    let json = r#"{
        "MailRelay": {
            "Servers": [
                { "Host": "smtp.example.com", "Password": "${env.SMTP_PASS}" }
            ]
        }
    }"#;
    let env = env_of(&[("SMTP_PASS", "hunter2hunter2")]);
    let config = load_config_from_str(json, &env).unwrap();
    assert_eq!(config.mail_relay.servers[0].password, "hunter2hunter2");
}

#[test]
fn test_secret_never_in_debug_output() {
    let json = r#"{ "API": { "JWTSecret": "super-secret-value" } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    let debugged = format!("{config:?}");
    assert!(!debugged.contains("super-secret-value"));
    assert!(debugged.contains("has_jwt_secret: true"));
}

#[test]
fn test_secret_never_serialized() {
    let json = r#"{ "API": { "JWTSecret": "super-secret-value" } }"#;
    let config = load_config_from_str(json, &HashMap::new()).unwrap();
    let serialized = serde_json::to_string(&config).unwrap();
    assert!(!serialized.contains("super-secret-value"));
    assert!(!serialized.contains("jwt_secret"));
}
