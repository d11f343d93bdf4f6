use serde::Serialize;

/// Outbound notification settings.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyConfig {
    /// Whether notifications are sent at all.
    pub enabled: bool,
    /// Active notifier backend (`none` or `smtp`).
    pub notifier: String,
    /// SMTP backend settings.
    pub smtp: SmtpNotifySettings,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            notifier: "none".to_owned(),
            smtp: SmtpNotifySettings::default(),
        }
    }
}

/// SMTP settings for the notification backend.
#[derive(Clone, Serialize)]
pub struct SmtpNotifySettings {
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
    /// Connection timeout, in seconds.
    pub timeout_secs: u64,
    /// Send retries per notification.
    pub max_retries: u64,
    /// From address on outgoing mail.
    pub from_address: String,
}

impl std::fmt::Debug for SmtpNotifySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifySettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("has_password", &!self.password.is_empty())
            .field("use_tls", &self.use_tls)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl Default for SmtpNotifySettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            use_tls: true,
            timeout_secs: 30,
            max_retries: 3,
            from_address: String::new(),
        }
    }
}
