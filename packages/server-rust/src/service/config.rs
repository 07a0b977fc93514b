use crate::storage::StorageConfig;
use crate::telemetry::LogFormat;

/// Server-level configuration for the record pipeline.
///
/// Parsed from flags and `GUESTDESK_*` environment variables by the embedding
/// binary, or built with `..ServerConfig::default()` in tests.
#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[command(name = "guestdesk", about = "Guest question/answer session store")]
pub struct ServerConfig {
    /// Maximum number of operations in flight before load shedding.
    #[arg(long, env = "GUESTDESK_MAX_CONCURRENT_OPERATIONS", default_value_t = 1000)]
    pub max_concurrent_operations: u32,
    /// Log output format.
    #[arg(long, env = "GUESTDESK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    #[command(flatten)]
    pub storage: StorageConfig,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_concurrent_operations must be greater than zero")]
    ZeroConcurrency,
    #[error("table name must not be empty")]
    EmptyTableName,
}

impl ServerConfig {
    /// Rejects settings that would leave the pipeline unusable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_operations == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.storage.table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_operations: 1000,
            log_format: LogFormat::Pretty,
            storage: StorageConfig::default(),
        }
    }
}
