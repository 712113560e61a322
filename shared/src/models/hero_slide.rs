//! Hero Slide Model

use serde::{Deserialize, Serialize};

/// Media type of a hero slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

/// Hero carousel slide
///
/// `order` is assigned at creation as current-count + 1 and is never
/// renumbered on delete; `active` controls public visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    /// Auto-incrementing numeric string
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Image URL or path (video URL when `media_type` is Video)
    pub image: String,
    #[serde(default)]
    pub media_type: MediaType,
    pub active: bool,
    pub order: i64,
}

/// Create/update payload for a hero slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlidePayload {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Kept from the existing record when absent on update
    pub order: Option<i64>,
}

fn default_active() -> bool {
    true
}
