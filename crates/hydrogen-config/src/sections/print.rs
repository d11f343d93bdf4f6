//! Print section loader: queue limits, priorities, and motion ceilings.

use serde_json::Value;

use super::{
    emit_group, emit_header, field_bool, field_f64, field_i64, field_u64, field_u64_units,
    group_node, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, PrintConfig};

const KNOWN_KEYS: &[&str] = &[
    "Enabled",
    "MaxQueuedJobs",
    "MaxConcurrentJobs",
    "Priorities",
    "Timeouts",
    "Buffers",
    "Motion",
];
const KNOWN_PRIORITY_KEYS: &[&str] = &["Default", "Emergency", "Maintenance", "System"];
const KNOWN_TIMEOUT_KEYS: &[&str] = &["ShutdownWaitMs", "JobProcessingTimeoutMs"];
const KNOWN_BUFFER_KEYS: &[&str] = &["JobMessageSize", "StatusMessageSize"];
const KNOWN_MOTION_KEYS: &[&str] = &[
    "MaxSpeed",
    "MaxSpeedXY",
    "MaxSpeedZ",
    "MaxSpeedTravel",
    "Acceleration",
    "ZAcceleration",
    "EAcceleration",
    "Jerk",
    "SmoothMoves",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Print");
    emit_header("Print", node.is_some());
    warn_unknown_keys("Print", node, KNOWN_KEYS);

    let d = PrintConfig::default();
    let c = &mut config.print;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.max_queued_jobs = field_u64(1, "MaxQueuedJobs", node, d.max_queued_jobs, env);
    c.max_concurrent_jobs = field_u64(1, "MaxConcurrentJobs", node, d.max_concurrent_jobs, env);

    let priorities = group_node(node, "Priorities");
    emit_group(1, "Priorities");
    warn_unknown_keys("Print.Priorities", priorities, KNOWN_PRIORITY_KEYS);
    let p = &mut c.priorities;
    p.default_priority = field_i64(2, "Default", priorities, d.priorities.default_priority, env);
    p.emergency_priority =
        field_i64(2, "Emergency", priorities, d.priorities.emergency_priority, env);
    p.maintenance_priority =
        field_i64(2, "Maintenance", priorities, d.priorities.maintenance_priority, env);
    p.system_priority = field_i64(2, "System", priorities, d.priorities.system_priority, env);

    let timeouts = group_node(node, "Timeouts");
    emit_group(1, "Timeouts");
    warn_unknown_keys("Print.Timeouts", timeouts, KNOWN_TIMEOUT_KEYS);
    c.timeouts.shutdown_wait_ms =
        field_u64_units(2, "ShutdownWaitMs", timeouts, d.timeouts.shutdown_wait_ms, "ms", env);
    c.timeouts.job_processing_timeout_ms = field_u64_units(
        2,
        "JobProcessingTimeoutMs",
        timeouts,
        d.timeouts.job_processing_timeout_ms,
        "ms",
        env,
    );

    let buffers = group_node(node, "Buffers");
    emit_group(1, "Buffers");
    warn_unknown_keys("Print.Buffers", buffers, KNOWN_BUFFER_KEYS);
    c.buffers.job_message_size =
        field_u64(2, "JobMessageSize", buffers, d.buffers.job_message_size, env);
    c.buffers.status_message_size =
        field_u64(2, "StatusMessageSize", buffers, d.buffers.status_message_size, env);

    let motion = group_node(node, "Motion");
    emit_group(1, "Motion");
    warn_unknown_keys("Print.Motion", motion, KNOWN_MOTION_KEYS);
    let m = &mut c.motion;
    m.max_speed = field_f64(2, "MaxSpeed", motion, d.motion.max_speed, env);
    m.max_speed_xy = field_f64(2, "MaxSpeedXY", motion, d.motion.max_speed_xy, env);
    m.max_speed_z = field_f64(2, "MaxSpeedZ", motion, d.motion.max_speed_z, env);
    m.max_speed_travel = field_f64(2, "MaxSpeedTravel", motion, d.motion.max_speed_travel, env);
    m.acceleration = field_f64(2, "Acceleration", motion, d.motion.acceleration, env);
    m.z_acceleration = field_f64(2, "ZAcceleration", motion, d.motion.z_acceleration, env);
    m.e_acceleration = field_f64(2, "EAcceleration", motion, d.motion.e_acceleration, env);
    m.jerk = field_f64(2, "Jerk", motion, d.motion.jerk, env);
    m.smooth_moves = field_bool(2, "SmoothMoves", motion, d.motion.smooth_moves, env);
    Ok(())
}
