use serde::Serialize;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize)]
pub struct WebServerConfig {
    /// Listen on IPv4.
    pub enable_ipv4: bool,
    /// Listen on IPv6.
    pub enable_ipv6: bool,
    /// TCP port.
    pub port: u16,
    /// Document root for static file serving.
    pub web_root: String,
    /// URL path accepting uploads.
    pub upload_path: String,
    /// Filesystem directory uploads land in.
    pub upload_dir: String,
    /// Largest accepted upload, in bytes.
    pub max_upload_size: u64,
    /// Worker threads servicing requests.
    pub thread_pool_size: u64,
    /// Concurrent connection ceiling.
    pub max_connections: u64,
    /// Concurrent connection ceiling per client address.
    pub max_connections_per_ip: u64,
    /// Idle connection timeout, in seconds.
    pub connection_timeout_secs: u64,
    /// Value served in `Access-Control-Allow-Origin`.
    pub cors_origin: String,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            enable_ipv4: true,
            enable_ipv6: false,
            port: 5000,
            web_root: "/var/www/hydrogen".to_owned(),
            upload_path: "/api/upload".to_owned(),
            upload_dir: "/tmp/hydrogen_uploads".to_owned(),
            max_upload_size: 2_147_483_648,
            thread_pool_size: 20,
            max_connections: 200,
            max_connections_per_ip: 10,
            connection_timeout_secs: 60,
            cors_origin: "*".to_owned(),
        }
    }
}
