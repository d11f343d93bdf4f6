use serde::Serialize;

/// WebSocket server settings.
#[derive(Clone, Serialize)]
pub struct WebSocketConfig {
    /// Listen on IPv4.
    pub enable_ipv4: bool,
    /// Listen on IPv6.
    pub enable_ipv6: bool,
    /// Verbosity of the underlying WebSocket library (0 = silent).
    pub lib_log_level: u8,
    /// TCP port.
    pub port: u16,
    /// Subprotocol name negotiated with clients.
    pub protocol: String,
    /// Shared auth key clients must present. Sensitive; never logged in
    /// full.
    #[serde(skip_serializing)]
    pub key: String,
    /// Largest accepted message, in bytes.
    pub max_message_size: u64,
    /// Shutdown and service-loop timing.
    pub connection_timeouts: WebSocketTimeouts,
}

impl std::fmt::Debug for WebSocketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketConfig")
            .field("enable_ipv4", &self.enable_ipv4)
            .field("enable_ipv6", &self.enable_ipv6)
            .field("lib_log_level", &self.lib_log_level)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("has_key", &!self.key.is_empty())
            .field("max_message_size", &self.max_message_size)
            .field("connection_timeouts", &self.connection_timeouts)
            .finish()
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            enable_ipv4: true,
            enable_ipv6: false,
            lib_log_level: 2,
            port: 5001,
            protocol: "hydrogen".to_owned(),
            key: String::new(),
            max_message_size: 1_048_576,
            connection_timeouts: WebSocketTimeouts::default(),
        }
    }
}

/// Shutdown and service-loop timing for the WebSocket server.
#[derive(Debug, Clone, Serialize)]
pub struct WebSocketTimeouts {
    /// Grace period for connections to drain on shutdown, in seconds.
    pub shutdown_wait_seconds: u64,
    /// Sleep between service-loop iterations, in milliseconds.
    pub service_loop_delay_ms: u64,
    /// Interval between dead-connection sweeps, in milliseconds.
    pub connection_cleanup_ms: u64,
    /// Hard cap on shutdown, in seconds.
    pub exit_wait_seconds: u64,
}

impl Default for WebSocketTimeouts {
    fn default() -> Self {
        Self {
            shutdown_wait_seconds: 2,
            service_loop_delay_ms: 50,
            connection_cleanup_ms: 500,
            exit_wait_seconds: 10,
        }
    }
}
