//! Store configuration.

use std::path::PathBuf;

/// Default maximum connections for the pool.
/// Kept low for a single-writer SQLite file.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the database file lives and how many pooled connections it may hold.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: std::env::var("AGORA_DB")
                .unwrap_or_else(|_| "questions.db".to_string())
                .into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StoreConfig {
    /// Config pointing at an explicit database path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path() {
        let config = StoreConfig::at("/tmp/board/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/board/test.db"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
