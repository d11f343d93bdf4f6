use serde::Serialize;

/// Process-wide resource ceilings.
#[derive(Debug, Clone, Serialize)]
pub struct ResourcesConfig {
    /// Overall memory ceiling, in MB.
    pub max_memory_mb: u64,
    /// Largest single buffer, in bytes.
    pub max_buffer_size: u64,
    /// Smallest allocated buffer, in bytes.
    pub min_buffer_size: u64,
    /// Queued item ceiling per queue.
    pub max_queue_size: u64,
    /// Memory ceiling across all queues, in MB.
    pub max_queue_memory_mb: u64,
    /// Block ceiling per queue.
    pub max_queue_blocks: u64,
    /// Blocking enqueue timeout, in milliseconds.
    pub queue_timeout_ms: u64,
    /// Post-processor scratch buffer, in bytes.
    pub post_processor_buffer_size: u64,
    /// Worker thread floor.
    pub min_threads: u64,
    /// Worker thread ceiling.
    pub max_threads: u64,
    /// Stack size per spawned thread, in bytes.
    pub thread_stack_size: u64,
    /// Open file descriptor ceiling.
    pub max_open_files: u64,
    /// Largest file handled, in MB.
    pub max_file_size_mb: u64,
    /// Log rotation threshold, in MB.
    pub max_log_size_mb: u64,
    /// Enforce ceilings (false logs overruns without acting).
    pub enforce_limits: bool,
    /// Periodically log usage against the ceilings.
    pub log_usage: bool,
    /// Usage check interval, in milliseconds.
    pub check_interval_ms: u64,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: 1024,
            max_buffer_size: 1_048_576,
            min_buffer_size: 4096,
            max_queue_size: 10_000,
            max_queue_memory_mb: 256,
            max_queue_blocks: 1024,
            queue_timeout_ms: 30_000,
            post_processor_buffer_size: 65_536,
            min_threads: 2,
            max_threads: 32,
            thread_stack_size: 1_048_576,
            max_open_files: 1024,
            max_file_size_mb: 2048,
            max_log_size_mb: 100,
            enforce_limits: true,
            log_usage: false,
            check_interval_ms: 5000,
        }
    }
}
