use serde::Serialize;

/// mDNS advertisement settings.
#[derive(Debug, Clone, Serialize)]
pub struct MdnsServerConfig {
    /// Advertise over IPv4.
    pub enable_ipv4: bool,
    /// Advertise over IPv6.
    pub enable_ipv6: bool,
    /// Stable device identifier.
    pub device_id: String,
    /// Name shown in discovery browsers.
    pub friendly_name: String,
    /// Advertised model string.
    pub model: String,
    /// Advertised manufacturer string.
    pub manufacturer: String,
    /// Advertised firmware/software version.
    pub version: String,
    /// Announcement retries before giving up.
    pub retry_count: u64,
    /// Services to advertise.
    pub services: Vec<MdnsService>,
}

impl Default for MdnsServerConfig {
    fn default() -> Self {
        Self {
            enable_ipv4: true,
            enable_ipv6: false,
            device_id: "hydrogen-printer".to_owned(),
            friendly_name: "Hydrogen 3D Printer".to_owned(),
            model: "Hydrogen".to_owned(),
            manufacturer: "Philement".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            retry_count: 3,
            services: Vec::new(),
        }
    }
}

/// One advertised mDNS service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MdnsService {
    /// Instance name.
    pub name: String,
    /// Service type, e.g. `_http._tcp`.
    pub service_type: String,
    /// Advertised port.
    pub port: u16,
    /// TXT record strings. A single-string config value becomes a
    /// one-element list.
    pub txt_records: Vec<String>,
}

/// mDNS discovery settings.
#[derive(Debug, Clone, Serialize)]
pub struct MdnsClientConfig {
    /// Scan over IPv4.
    pub enable_ipv4: bool,
    /// Scan over IPv6.
    pub enable_ipv6: bool,
    /// Interval between scans, in seconds.
    pub scan_interval_secs: u64,
    /// Tracked service ceiling.
    pub max_services: u64,
    /// Query retries before a scan is abandoned.
    pub retry_count: u64,
    /// Probe discovered services for liveness.
    pub health_check_enabled: bool,
    /// Interval between health probes, in seconds.
    pub health_check_interval_secs: u64,
    /// Service types to look for.
    pub service_types: Vec<String>,
}

impl Default for MdnsClientConfig {
    fn default() -> Self {
        Self {
            enable_ipv4: true,
            enable_ipv6: false,
            scan_interval_secs: 30,
            max_services: 32,
            retry_count: 3,
            health_check_enabled: true,
            health_check_interval_secs: 60,
            service_types: Vec::new(),
        }
    }
}
