//! Data models
//!
//! Shared between mesa-server and the admin dashboard (via API).
//! List-valued entities carry their own id/order fields; assignment
//! rules live in the server's store layer.

pub mod category;
pub mod hero_slide;
pub mod image;
pub mod menu_item;
pub mod restaurant_info;

// Re-exports
pub use category::*;
pub use hero_slide::*;
pub use image::*;
pub use menu_item::*;
pub use restaurant_info::*;
