//! Resources section loader: process-wide ceilings.

use serde_json::Value;

use super::{
    emit_header, field_bool, field_u64, field_u64_units, section_node, warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, ResourcesConfig};

const KNOWN_KEYS: &[&str] = &[
    "MaxMemoryMB",
    "MaxBufferSize",
    "MinBufferSize",
    "MaxQueueSize",
    "MaxQueueMemoryMB",
    "MaxQueueBlocks",
    "QueueTimeoutMs",
    "PostProcessorBufferSize",
    "MinThreads",
    "MaxThreads",
    "ThreadStackSize",
    "MaxOpenFiles",
    "MaxFileSizeMB",
    "MaxLogSizeMB",
    "EnforceLimits",
    "LogUsage",
    "CheckIntervalMs",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Resources");
    emit_header("Resources", node.is_some());
    warn_unknown_keys("Resources", node, KNOWN_KEYS);

    let d = ResourcesConfig::default();
    let c = &mut config.resources;
    c.max_memory_mb = field_u64_units(1, "MaxMemoryMB", node, d.max_memory_mb, "MB", env);
    c.max_buffer_size = field_u64(1, "MaxBufferSize", node, d.max_buffer_size, env);
    c.min_buffer_size = field_u64(1, "MinBufferSize", node, d.min_buffer_size, env);
    c.max_queue_size = field_u64(1, "MaxQueueSize", node, d.max_queue_size, env);
    c.max_queue_memory_mb =
        field_u64_units(1, "MaxQueueMemoryMB", node, d.max_queue_memory_mb, "MB", env);
    c.max_queue_blocks = field_u64(1, "MaxQueueBlocks", node, d.max_queue_blocks, env);
    c.queue_timeout_ms = field_u64_units(1, "QueueTimeoutMs", node, d.queue_timeout_ms, "ms", env);
    c.post_processor_buffer_size =
        field_u64(1, "PostProcessorBufferSize", node, d.post_processor_buffer_size, env);
    c.min_threads = field_u64(1, "MinThreads", node, d.min_threads, env);
    c.max_threads = field_u64(1, "MaxThreads", node, d.max_threads, env);
    c.thread_stack_size = field_u64(1, "ThreadStackSize", node, d.thread_stack_size, env);
    c.max_open_files = field_u64(1, "MaxOpenFiles", node, d.max_open_files, env);
    c.max_file_size_mb = field_u64_units(1, "MaxFileSizeMB", node, d.max_file_size_mb, "MB", env);
    c.max_log_size_mb = field_u64_units(1, "MaxLogSizeMB", node, d.max_log_size_mb, "MB", env);
    c.enforce_limits = field_bool(1, "EnforceLimits", node, d.enforce_limits, env);
    c.log_usage = field_bool(1, "LogUsage", node, d.log_usage, env);
    c.check_interval_ms =
        field_u64_units(1, "CheckIntervalMs", node, d.check_interval_ms, "ms", env);
    Ok(())
}
