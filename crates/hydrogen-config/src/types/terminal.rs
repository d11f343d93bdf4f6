use serde::Serialize;

/// Web terminal gateway settings.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalConfig {
    /// Whether the terminal gateway is mounted.
    pub enabled: bool,
    /// URL path the terminal UI lives under.
    pub web_path: String,
    /// Shell spawned for each session.
    pub shell_command: String,
    /// Concurrent session ceiling.
    pub max_sessions: u64,
    /// Idle session timeout, in seconds.
    pub idle_timeout_seconds: u64,
    /// Scrollback buffer size per session, in bytes.
    pub buffer_size: u64,
    /// Document root holding the terminal UI assets.
    pub web_root: String,
    /// Value served in `Access-Control-Allow-Origin` for terminal routes.
    pub cors_origin: String,
    /// Entry page served at the web path.
    pub index_page: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            web_path: "/terminal".to_owned(),
            shell_command: "/bin/bash".to_owned(),
            max_sessions: 4,
            idle_timeout_seconds: 600,
            buffer_size: 4096,
            web_root: "/var/www/hydrogen/terminal".to_owned(),
            cors_origin: "*".to_owned(),
            index_page: "terminal.html".to_owned(),
        }
    }
}
