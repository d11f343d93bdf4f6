#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Subsystem registry and lifecycle controller for the Hydrogen server.
//!
//! Heterogeneous services register with the [`SubsystemRegistry`] as
//! [`Subsystem`] objects with declared dependencies. The
//! [`LifecycleController`] then drives them through the state machine:
//!
//! ```text
//! Inactive → Starting → Running → Stopping → Inactive
//!      (any state) → Error
//! ```
//!
//! Launch runs in declaration order, gated on every declared dependency
//! being `Running`; landing walks the reverse order and stops transitive
//! dependents before the subsystem they depend on. Failures are contained:
//! an unready subsystem stays `Inactive`, a failed `init` marks `Error` and
//! starves its dependents, a shutdown that overruns its bounded wait marks
//! `Error` without stalling the landing.
//!
//! The scheduling model is plain threads. The registry is guarded by one
//! `RwLock`; `init`/`shutdown` callbacks always run with the lock released.

/// Registry and lifecycle error types.
pub mod error;
/// Launch readiness decisions.
pub mod readiness;
/// The subsystem registry and its state machine.
pub mod registry;
/// The capability traits subsystems implement.
pub mod subsystem;

/// The launch/landing controller.
pub mod controller;

pub use controller::LifecycleController;
pub use error::{RegistryError, SubsystemError};
pub use readiness::LaunchReadiness;
pub use registry::{MAX_DEPENDENCIES, SubsystemId, SubsystemRegistry};
pub use subsystem::{Subsystem, SubsystemState, ThreadHandle, WorkerHandle};
