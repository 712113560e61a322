//! Server configuration
//!
//! All settings come from environment variables, read exactly once at
//! startup. Components receive a constructed [`StorageConfig`]; the
//! backing-store choice is never re-derived from the environment at
//! call sites.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Content files, database, logs |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | (unset) | SQLite file; unset = database tier off |
//! | ENVIRONMENT | development | development \| production |
//! | ADMIN_TOKEN | (unset) | Bearer token gating write endpoints |
//! | LOG_LEVEL | info | tracing level filter |
//! | LOG_DIR | (unset) | Daily-rolling log files; unset = stdout only |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding content files and the database
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database path; `None` means the database tier is not
    /// configured and menu content lives in the structured file
    pub database_path: Option<String>,
    /// Deployment environment: development | production
    pub environment: String,
    /// Bearer token required on write endpoints; unset disables the
    /// gate (development only, refused in production at startup)
    pub admin_token: Option<String>,
    /// Log level filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok().filter(|p| !p.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Directory the content files live in.
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("content")
    }

    /// The storage configuration injected into the services.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            production: self.is_production(),
            database_configured: self.database_path.is_some(),
            content_dir: self.content_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Explicit storage configuration passed to the store components at
/// startup (deployment mode + tier availability + content location).
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub production: bool,
    pub database_configured: bool,
    pub content_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_reflects_environment_and_database() {
        let config = Config {
            work_dir: "/tmp/mesa".to_string(),
            http_port: 3000,
            database_path: Some("/tmp/mesa/menu.db".to_string()),
            environment: "production".to_string(),
            admin_token: None,
            log_level: "info".to_string(),
        };
        let storage = config.storage();
        assert!(storage.production);
        assert!(storage.database_configured);
        assert_eq!(storage.content_dir, PathBuf::from("/tmp/mesa/content"));
    }
}
