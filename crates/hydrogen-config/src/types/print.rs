use serde::Serialize;

/// Print job queue settings.
#[derive(Debug, Clone, Serialize)]
pub struct PrintConfig {
    /// Whether the print queue accepts jobs.
    pub enabled: bool,
    /// Queued job ceiling.
    pub max_queued_jobs: u64,
    /// Jobs executing at once.
    pub max_concurrent_jobs: u64,
    /// Priority bands for queued jobs.
    pub priorities: PrintPriorities,
    /// Shutdown and per-job timing.
    pub timeouts: PrintTimeouts,
    /// Internal message buffer sizes.
    pub buffers: PrintBuffers,
    /// Motion planner ceilings forwarded to job validation.
    pub motion: MotionLimits,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_queued_jobs: 100,
            max_concurrent_jobs: 4,
            priorities: PrintPriorities::default(),
            timeouts: PrintTimeouts::default(),
            buffers: PrintBuffers::default(),
            motion: MotionLimits::default(),
        }
    }
}

/// Priority bands for queued print jobs. Higher runs sooner.
#[derive(Debug, Clone, Serialize)]
pub struct PrintPriorities {
    /// Priority for ordinary jobs.
    pub default_priority: i64,
    /// Priority for emergency jobs (abort, safety moves).
    pub emergency_priority: i64,
    /// Priority for maintenance jobs.
    pub maintenance_priority: i64,
    /// Priority for system-originated jobs.
    pub system_priority: i64,
}

impl Default for PrintPriorities {
    fn default() -> Self {
        Self {
            default_priority: 50,
            emergency_priority: 100,
            maintenance_priority: 75,
            system_priority: 90,
        }
    }
}

/// Shutdown and per-job timing for the print queue.
#[derive(Debug, Clone, Serialize)]
pub struct PrintTimeouts {
    /// Grace period for in-flight jobs on shutdown, in milliseconds.
    pub shutdown_wait_ms: u64,
    /// Ceiling on a single job's processing time, in milliseconds.
    pub job_processing_timeout_ms: u64,
}

impl Default for PrintTimeouts {
    fn default() -> Self {
        Self {
            shutdown_wait_ms: 3000,
            job_processing_timeout_ms: 600_000,
        }
    }
}

/// Internal message buffer sizes for the print queue.
#[derive(Debug, Clone, Serialize)]
pub struct PrintBuffers {
    /// Job message buffer, in bytes.
    pub job_message_size: u64,
    /// Status message buffer, in bytes.
    pub status_message_size: u64,
}

impl Default for PrintBuffers {
    fn default() -> Self {
        Self {
            job_message_size: 256,
            status_message_size: 256,
        }
    }
}

/// Motion planner ceilings used to validate queued jobs.
#[derive(Debug, Clone, Serialize)]
pub struct MotionLimits {
    /// Overall speed ceiling, mm/s.
    pub max_speed: f64,
    /// XY speed ceiling, mm/s.
    pub max_speed_xy: f64,
    /// Z speed ceiling, mm/s.
    pub max_speed_z: f64,
    /// Travel (non-extruding) speed ceiling, mm/s.
    pub max_speed_travel: f64,
    /// XY acceleration ceiling, mm/s².
    pub acceleration: f64,
    /// Z acceleration ceiling, mm/s².
    pub z_acceleration: f64,
    /// Extruder acceleration ceiling, mm/s².
    pub e_acceleration: f64,
    /// Jerk limit, mm/s.
    pub jerk: f64,
    /// Smooth short segments into arcs.
    pub smooth_moves: bool,
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            max_speed_xy: 200.0,
            max_speed_z: 20.0,
            max_speed_travel: 300.0,
            acceleration: 3000.0,
            z_acceleration: 100.0,
            e_acceleration: 10_000.0,
            jerk: 8.0,
            smooth_moves: true,
        }
    }
}
