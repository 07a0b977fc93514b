//! Storage configuration.

use std::path::PathBuf;

use super::impls::DEFAULT_TABLE_NAME;

/// Default `redb` page cache size: 64 MiB.
pub const DEFAULT_CACHE_SIZE_BYTES: usize = 64 * 1024 * 1024;

/// Default database file, created in the working directory.
pub const DEFAULT_DB_PATH: &str = "questions_answers.redb";

/// Where and how the record database is opened.
///
/// Parsed from command-line flags or `GUESTDESK_*` environment variables when
/// flattened into a `clap` parser, or constructed directly for tests.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct StorageConfig {
    /// Path of the database file. Ignored when `in_memory` is set.
    #[arg(long = "db-path", env = "GUESTDESK_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
    /// Name of the table holding guest records.
    #[arg(long = "table", env = "GUESTDESK_TABLE", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
    /// Page cache size in bytes.
    #[arg(long, env = "GUESTDESK_CACHE_SIZE_BYTES", default_value_t = DEFAULT_CACHE_SIZE_BYTES)]
    pub cache_size_bytes: usize,
    /// Keep the database in memory only (nothing survives the process).
    #[arg(long, env = "GUESTDESK_IN_MEMORY")]
    pub in_memory: bool,
}

impl StorageConfig {
    /// Ephemeral in-memory configuration, mostly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            cache_size_bytes: DEFAULT_CACHE_SIZE_BYTES,
            in_memory: false,
        }
    }
}
