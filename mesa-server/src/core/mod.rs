//! Core Module

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, StorageConfig};
pub use server::Server;
pub use state::ServerState;
