//! Hydrogen application server entry point.
//!
//! Loads the configuration, registers every service subsystem with the
//! registry, launches the ready set in dependency order, then waits for
//! SIGINT/SIGTERM and lands everything in reverse order.

mod probes;
mod subsystems;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hydrogen_lifecycle::{LifecycleController, SubsystemRegistry};

/// Hydrogen application server.
#[derive(Debug, Parser)]
#[command(name = "hydrogen", version, about)]
struct Cli {
    /// Path to the configuration file. `HYDROGEN_CONFIG` takes precedence;
    /// with neither set the default locations are probed.
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            ExitCode::FAILURE
        },
    }
}

/// Install the subscriber: `HYDROGEN_LOG` filter override, `info` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("HYDROGEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = hydrogen_config::load_config(cli.config.as_deref())?;

    if config.server.startup_delay_ms > 0 {
        std::thread::sleep(Duration::from_millis(config.server.startup_delay_ms));
    }
    info!(server = %config.server.server_name, "starting");

    let registry = Arc::new(SubsystemRegistry::new());
    subsystems::register_all(&registry)?;

    let controller = LifecycleController::new(Arc::clone(&registry));
    let results = controller.check_all_readiness(&config);
    let launched = controller.launch_ready(&results);
    info!(launched, registered = registry.len(), "launch sequence complete");

    wait_for_shutdown_signal()?;

    controller.land_all();
    hydrogen_config::cleanup_application_config();
    Ok(())
}

/// Block until SIGINT or SIGTERM arrives.
fn wait_for_shutdown_signal() -> Result<(), std::io::Error> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "shutdown signal received");
    }
    Ok(())
}
