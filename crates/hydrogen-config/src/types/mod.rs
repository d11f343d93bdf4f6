//! Configuration struct definitions, one substructure per domain.
//!
//! Every struct implements [`Default`] with the compiled-in baseline, so an
//! absent section (or an absent config file) still produces a complete,
//! working configuration. Structs holding secret material hand-write
//! `Debug` and skip the secret on serialization so no dump ever leaks it.

mod api;
mod databases;
mod logging;
mod mail;
mod mdns;
mod network;
mod notify;
mod oidc;
mod print;
mod resources;
mod server;
mod swagger;
mod terminal;
mod webserver;
mod websocket;

pub use api::ApiConfig;
pub use databases::{
    DatabaseConnection, DatabasesConfig, DefaultQueues, MAX_DATABASE_CONNECTIONS, QueueScaling,
};
pub use logging::{LogDestination, LoggingConfig};
pub(crate) use logging::KNOWN_LEVELS;
pub use mail::{MailQueueSettings, MailRelayConfig, SmtpOutboundServer};
pub use mdns::{MdnsClientConfig, MdnsServerConfig, MdnsService};
pub use network::{InterfaceAvailability, InterfaceLimits, NetworkConfig, PortAllocation};
pub use notify::{NotifyConfig, SmtpNotifySettings};
pub use oidc::{OidcConfig, OidcEndpoints, OidcKeys, OidcTokens};
pub use print::{MotionLimits, PrintBuffers, PrintConfig, PrintPriorities, PrintTimeouts};
pub use resources::ResourcesConfig;
pub use server::ServerConfig;
pub use swagger::{ContactInfo, LicenseInfo, SwaggerConfig, SwaggerMetadata, SwaggerUiOptions};
pub use terminal::TerminalConfig;
pub use webserver::WebServerConfig;
pub use websocket::{WebSocketConfig, WebSocketTimeouts};

use serde::Serialize;

/// Root configuration aggregate for the Hydrogen server.
///
/// One owning substructure per domain, populated by the section loaders in
/// a fixed order, Server through Notify. Exactly one `AppConfig` is current process-wide at
/// any time; see [`crate::loader`] for the slot semantics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppConfig {
    /// Server identity, log file, payload key, startup delay.
    pub server: ServerConfig,
    /// Interface limits, port allocation, interface availability.
    pub network: NetworkConfig,
    /// Database connections and worker-queue scaling.
    pub databases: DatabasesConfig,
    /// Per-destination log levels.
    pub logging: LoggingConfig,
    /// HTTP server.
    pub webserver: WebServerConfig,
    /// REST API surface.
    pub api: ApiConfig,
    /// Swagger/OpenAPI UI.
    pub swagger: SwaggerConfig,
    /// WebSocket server.
    pub websocket: WebSocketConfig,
    /// Web terminal gateway.
    pub terminal: TerminalConfig,
    /// mDNS advertisement.
    pub mdns_server: MdnsServerConfig,
    /// mDNS discovery.
    pub mdns_client: MdnsClientConfig,
    /// SMTP relay.
    pub mail_relay: MailRelayConfig,
    /// Print job queue and motion limits.
    pub print: PrintConfig,
    /// Process-wide resource ceilings.
    pub resources: ResourcesConfig,
    /// OIDC identity provider.
    pub oidc: OidcConfig,
    /// Outbound notifications.
    pub notify: NotifyConfig,
}
