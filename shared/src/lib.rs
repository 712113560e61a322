//! Shared types for the Mesa CMS
//!
//! Domain models used by the server and exchanged with the admin
//! dashboard over the API. All persisted JSON uses camelCase keys so the
//! structured content files stay readable next to the original site data.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
