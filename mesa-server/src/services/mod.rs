//! Services
//!
//! The boundary operations the web layer consumes: menu content behind
//! the fallback chain, image collections and restaurant info over the
//! structured file, hero slides over the flat-JSON store.

pub mod content_service;
pub mod hero_service;
pub mod menu_service;

pub use content_service::ContentService;
pub use hero_service::HeroService;
pub use menu_service::{Menu, MenuService, MenuTier, WriteOutcome};
