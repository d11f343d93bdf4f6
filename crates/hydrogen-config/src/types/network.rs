use serde::Serialize;

/// Network limits and port policy.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkConfig {
    /// Interface enumeration ceilings.
    pub interfaces: InterfaceLimits,
    /// Port range and reservations shared by all listening subsystems.
    pub port_allocation: PortAllocation,
    /// Per-interface availability, sorted by interface name.
    ///
    /// When the config omits the `Available` object a single `"all": true`
    /// entry is synthesised.
    pub available: Vec<InterfaceAvailability>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interfaces: InterfaceLimits::default(),
            port_allocation: PortAllocation::default(),
            available: vec![InterfaceAvailability {
                name: "all".to_owned(),
                available: true,
            }],
        }
    }
}

/// Ceilings for interface enumeration buffers.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceLimits {
    /// Maximum number of interfaces enumerated.
    pub max_interfaces: u64,
    /// Maximum IP addresses tracked per interface.
    pub max_ips_per_interface: u64,
    /// Maximum interface name length in bytes.
    pub max_interface_name_length: u64,
    /// Maximum textual IP address length in bytes (IPv6-sized).
    pub max_ip_address_length: u64,
}

impl Default for InterfaceLimits {
    fn default() -> Self {
        Self {
            max_interfaces: 16,
            max_ips_per_interface: 8,
            max_interface_name_length: 16,
            max_ip_address_length: 46,
        }
    }
}

/// Port range available to subsystems, with explicit reservations.
#[derive(Debug, Clone, Serialize)]
pub struct PortAllocation {
    /// Lowest allocatable port, inclusive.
    pub start_port: u16,
    /// Highest allocatable port, inclusive.
    pub end_port: u16,
    /// Ports withheld from allocation, in document order, no duplicates.
    pub reserved_ports: Vec<u16>,
}

impl Default for PortAllocation {
    fn default() -> Self {
        Self {
            start_port: 1024,
            end_port: 65535,
            reserved_ports: Vec::new(),
        }
    }
}

/// Whether a named interface may be used for listening sockets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceAvailability {
    /// Interface name (`"all"` matches every interface).
    pub name: String,
    /// True when subsystems may bind on this interface.
    pub available: bool,
}
