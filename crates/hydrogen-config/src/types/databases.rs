use serde::Serialize;

/// Upper bound on configured database connections.
pub const MAX_DATABASE_CONNECTIONS: usize = 5;

/// Database pool configuration.
#[derive(Debug, Clone, Serialize)]
pub struct DatabasesConfig {
    /// Worker threads per connection when the connection does not say.
    pub default_workers: u64,
    /// Number of configured connections. Always equals `connections.len()`.
    pub connection_count: usize,
    /// Normalized connection list, at most [`MAX_DATABASE_CONNECTIONS`].
    pub connections: Vec<DatabaseConnection>,
    /// Worker-queue scaling profiles applied to every connection.
    pub default_queues: DefaultQueues,
}

impl Default for DatabasesConfig {
    fn default() -> Self {
        Self {
            default_workers: 1,
            connection_count: 0,
            connections: Vec::new(),
            default_queues: DefaultQueues::default(),
        }
    }
}

/// One named database connection.
#[derive(Clone, Serialize)]
pub struct DatabaseConnection {
    /// Connection name, unique within the list.
    pub name: String,
    /// Whether the connection participates in pool startup.
    pub enabled: bool,
    /// Database engine identifier (`postgres`, `sqlite`, ...). The config
    /// file may spell this `Type` or `Engine`.
    pub engine: String,
    /// Database name to open.
    pub database: String,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub pass: String,
    /// Worker threads for this connection.
    pub workers: u64,
    /// Prepared-statement cache entries per worker.
    pub prepared_statement_cache_size: u64,
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("engine", &self.engine)
            .field("database", &self.database)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("has_pass", &!self.pass.is_empty())
            .field("workers", &self.workers)
            .field(
                "prepared_statement_cache_size",
                &self.prepared_statement_cache_size,
            )
            .finish()
    }
}

impl Default for DatabaseConnection {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            engine: "postgres".to_owned(),
            database: String::new(),
            host: "localhost".to_owned(),
            port: 5432,
            user: String::new(),
            pass: String::new(),
            workers: 1,
            prepared_statement_cache_size: 100,
        }
    }
}

/// Worker-count scaling for one queue speed class.
#[derive(Debug, Clone, Serialize)]
pub struct QueueScaling {
    /// Workers started immediately.
    pub start_workers: u64,
    /// Floor the pool never shrinks below.
    pub min_workers: u64,
    /// Ceiling the pool never grows beyond.
    pub max_workers: u64,
}

/// Queue scaling profiles for the four speed classes.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultQueues {
    /// Long-running analytical work.
    pub slow: QueueScaling,
    /// General-purpose statements.
    pub medium: QueueScaling,
    /// Latency-sensitive lookups.
    pub fast: QueueScaling,
    /// Cache refresh traffic.
    pub cache: QueueScaling,
}

impl Default for DefaultQueues {
    fn default() -> Self {
        Self {
            slow: QueueScaling {
                start_workers: 1,
                min_workers: 1,
                max_workers: 4,
            },
            medium: QueueScaling {
                start_workers: 2,
                min_workers: 1,
                max_workers: 8,
            },
            fast: QueueScaling {
                start_workers: 4,
                min_workers: 2,
                max_workers: 16,
            },
            cache: QueueScaling {
                start_workers: 1,
                min_workers: 1,
                max_workers: 4,
            },
        }
    }
}
