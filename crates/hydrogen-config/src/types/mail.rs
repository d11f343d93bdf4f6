use serde::Serialize;

/// SMTP relay settings.
#[derive(Debug, Clone, Serialize)]
pub struct MailRelayConfig {
    /// Whether the relay listens at all.
    pub enabled: bool,
    /// Inbound SMTP listen port.
    pub listen_port: u16,
    /// Delivery worker threads.
    pub workers: u64,
    /// Queue limits and retry policy.
    pub queue: MailQueueSettings,
    /// Outbound servers tried in order.
    pub servers: Vec<SmtpOutboundServer>,
}

impl Default for MailRelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_port: 2525,
            workers: 2,
            queue: MailQueueSettings::default(),
            servers: Vec::new(),
        }
    }
}

/// Relay queue limits and retry policy.
#[derive(Debug, Clone, Serialize)]
pub struct MailQueueSettings {
    /// Queued message ceiling.
    pub max_queue_size: u64,
    /// Delivery attempts per message.
    pub retry_attempts: u64,
    /// Delay between delivery attempts, in seconds.
    pub retry_delay_seconds: u64,
}

impl Default for MailQueueSettings {
    fn default() -> Self {
        Self {
            max_queue_size: 1000,
            retry_attempts: 3,
            retry_delay_seconds: 300,
        }
    }
}

/// One outbound SMTP server.
#[derive(Clone, Serialize)]
pub struct SmtpOutboundServer {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub username: String,
    /// Login password. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub password: String,
    /// Negotiate TLS before authenticating.
    pub use_tls: bool,
}

impl std::fmt::Debug for SmtpOutboundServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpOutboundServer")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("has_password", &!self.password.is_empty())
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

impl Default for SmtpOutboundServer {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            use_tls: true,
        }
    }
}
