#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Hierarchical configuration for the Hydrogen application server.
//!
//! This crate owns the [`AppConfig`] aggregate and everything that populates
//! it: a single JSON document, `${env.NAME}` references resolved against the
//! process environment, and compiled-in defaults. Every resolved value keeps
//! a [`Provenance`](resolve::Provenance) tag so the structured startup log
//! shows exactly where each setting came from.
//!
//! # Loading
//!
//! ```rust,no_run
//! let config = hydrogen_config::load_config(None).unwrap();
//! println!("web server port: {}", config.webserver.port);
//! ```
//!
//! The source file is resolved in this order: the `HYDROGEN_CONFIG`
//! environment variable, an explicit command-line path, then the first
//! readable of `hydrogen.json`, `/etc/hydrogen/hydrogen.json`,
//! `/usr/local/etc/hydrogen/hydrogen.json`. With no source at all the
//! loader proceeds from an empty document and every value is a default.
//!
//! # Design
//!
//! The [`resolve`] module is the only place that inspects raw JSON node
//! types; section loaders and everything above them speak in typed values
//! with provenance. Section loaders run in a fixed order and each one fully
//! populates its own substructure, so a successful load always yields a
//! complete configuration.

/// Configuration error types.
pub mod error;
/// Source discovery, parsing, and the process-wide config slot.
pub mod loader;
/// Typed value resolution with provenance tracking.
pub mod resolve;
/// Configuration struct definitions, one substructure per domain.
pub mod types;

mod sections;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    cleanup_application_config, current_config, load_config, load_config_from_str,
};
pub use resolve::{EnvVars, Provenance, Resolved, collect_env_vars, is_sensitive_name, masked};
pub use types::*;
