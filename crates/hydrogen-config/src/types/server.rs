use serde::Serialize;

/// Server identity and process-level settings.
#[derive(Clone, Serialize)]
pub struct ServerConfig {
    /// Human-readable server name, advertised by mDNS and the web UI.
    pub server_name: String,
    /// Path the file log destination writes to.
    pub log_file: String,
    /// Key unlocking the embedded payload. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub payload_key: String,
    /// Delay before the launch sequence starts, in milliseconds.
    pub startup_delay_ms: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("server_name", &self.server_name)
            .field("log_file", &self.log_file)
            .field("has_payload_key", &!self.payload_key.is_empty())
            .field("startup_delay_ms", &self.startup_delay_ms)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "hydrogen".to_owned(),
            log_file: "/var/log/hydrogen.log".to_owned(),
            payload_key: String::new(),
            startup_delay_ms: 5,
        }
    }
}
