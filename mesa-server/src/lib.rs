//! Mesa CMS server
//!
//! Content-management backend for a restaurant marketing site. Menu
//! content lives behind a three-tier fallback chain (SQLite →
//! structured source file → built-in dataset); image collections and
//! restaurant info persist in a source-shaped content file; hero
//! slides in flat JSON.

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState, StorageConfig};
pub use utils::init_logger_with_file;

/// Load environment and set up logging. Called once at startup.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&level), log_dir.as_deref())
}
