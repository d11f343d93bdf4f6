//! Per-subsystem readiness probes.
//!
//! Each probe inspects the loaded configuration and decides whether its
//! subsystem may launch. Cross-subsystem checks (port collisions, missing
//! collaborators) live here rather than in the section loaders, which only
//! do structural validation.

use hydrogen_config::AppConfig;
use hydrogen_lifecycle::LaunchReadiness;

pub(crate) fn webserver(config: &AppConfig) -> LaunchReadiness {
    let c = &config.webserver;
    let mut problems = Vec::new();
    if !c.enable_ipv4 && !c.enable_ipv6 {
        problems.push("webserver has no interface family enabled".to_owned());
    }
    if c.web_root.is_empty() {
        problems.push("webserver WebRoot is empty".to_owned());
    }
    decide("webserver", problems)
}

pub(crate) fn websocket(config: &AppConfig) -> LaunchReadiness {
    let c = &config.websocket;
    let mut problems = Vec::new();
    if !c.enable_ipv4 && !c.enable_ipv6 {
        problems.push("websocket has no interface family enabled".to_owned());
    }
    if c.port == config.webserver.port {
        problems.push(format!("websocket port {} collides with the webserver", c.port));
    }
    decide("websocket", problems)
}

pub(crate) fn terminal(config: &AppConfig) -> LaunchReadiness {
    let c = &config.terminal;
    let mut problems = Vec::new();
    if !c.enabled {
        problems.push("terminal disabled in configuration".to_owned());
    }
    if c.shell_command.is_empty() {
        problems.push("terminal ShellCommand is empty".to_owned());
    }
    if c.max_sessions == 0 {
        problems.push("terminal MaxSessions is zero".to_owned());
    }
    decide("terminal", problems)
}

pub(crate) fn mdns_server(config: &AppConfig) -> LaunchReadiness {
    let c = &config.mdns_server;
    let mut problems = Vec::new();
    if !c.enable_ipv4 && !c.enable_ipv6 {
        problems.push("mdns-server has no interface family enabled".to_owned());
    }
    if c.device_id.is_empty() {
        problems.push("mdns-server DeviceId is empty".to_owned());
    }
    decide("mdns-server", problems)
}

pub(crate) fn mdns_client(config: &AppConfig) -> LaunchReadiness {
    let c = &config.mdns_client;
    let mut problems = Vec::new();
    if !c.enable_ipv4 && !c.enable_ipv6 {
        problems.push("mdns-client has no interface family enabled".to_owned());
    }
    if c.scan_interval_secs == 0 {
        problems.push("mdns-client ScanInterval is zero".to_owned());
    }
    decide("mdns-client", problems)
}

pub(crate) fn mail_relay(config: &AppConfig) -> LaunchReadiness {
    let c = &config.mail_relay;
    let mut problems = Vec::new();
    if !c.enabled {
        problems.push("mail-relay disabled in configuration".to_owned());
    }
    if c.servers.is_empty() {
        problems.push("mail-relay has no outbound servers configured".to_owned());
    }
    for (other, port) in [
        ("webserver", config.webserver.port),
        ("websocket", config.websocket.port),
    ] {
        if c.listen_port == port {
            problems.push(format!("mail-relay listen port {} collides with the {other}", c.listen_port));
        }
    }
    decide("mail-relay", problems)
}

pub(crate) fn print_queue(config: &AppConfig) -> LaunchReadiness {
    let c = &config.print;
    let mut problems = Vec::new();
    if !c.enabled {
        problems.push("print queue disabled in configuration".to_owned());
    }
    if c.max_concurrent_jobs == 0 {
        problems.push("print MaxConcurrentJobs is zero".to_owned());
    }
    decide("print-queue", problems)
}

pub(crate) fn oidc(config: &AppConfig) -> LaunchReadiness {
    let c = &config.oidc;
    let mut problems = Vec::new();
    if !c.enabled {
        problems.push("oidc disabled in configuration".to_owned());
    }
    if c.issuer.is_empty() {
        problems.push("oidc Issuer is empty".to_owned());
    }
    if c.client_id.is_empty() {
        problems.push("oidc ClientId is empty".to_owned());
    }
    for (other, port) in [
        ("webserver", config.webserver.port),
        ("websocket", config.websocket.port),
    ] {
        if c.port == port {
            problems.push(format!("oidc port {} collides with the {other}", c.port));
        }
    }
    decide("oidc", problems)
}

fn decide(subsystem: &str, problems: Vec<String>) -> LaunchReadiness {
    if problems.is_empty() {
        LaunchReadiness::ready(subsystem)
    } else {
        LaunchReadiness::not_ready(subsystem, problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_make_core_services_ready() {
        let config = AppConfig::default();
        assert!(webserver(&config).ready);
        assert!(websocket(&config).ready);
        assert!(terminal(&config).ready);
        assert!(mdns_server(&config).ready);
        assert!(mdns_client(&config).ready);
    }

    #[test]
    fn test_defaults_keep_optional_services_unready() {
        let config = AppConfig::default();
        // No outbound servers configured by default.
        assert!(!mail_relay(&config).ready);
        // Disabled by default.
        assert!(!print_queue(&config).ready);
        assert!(!oidc(&config).ready);
    }

    #[test]
    fn test_websocket_port_collision_detected() {
        let mut config = AppConfig::default();
        config.websocket.port = config.webserver.port;
        let decision = websocket(&config);
        assert!(!decision.ready);
        assert!(decision.messages.iter().any(|m| m.contains("collides")));
    }

    #[test]
    fn test_no_interface_family_blocks_webserver() {
        let mut config = AppConfig::default();
        config.webserver.enable_ipv4 = false;
        config.webserver.enable_ipv6 = false;
        assert!(!webserver(&config).ready);
    }
}
