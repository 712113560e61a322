//! Image Collection Models
//!
//! Three distinct collections back the public page: the food gallery
//! (insertion order is display order), the about section and the
//! interior gallery (both carry an explicit `order` field).

use serde::{Deserialize, Serialize};

/// Which logical image collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Gallery,
    About,
    Interior,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Gallery => "gallery",
            ImageKind::About => "about",
            ImageKind::Interior => "interior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gallery" => Some(ImageKind::Gallery),
            "about" => Some(ImageKind::About),
            "interior" => Some(ImageKind::Interior),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Food gallery image. No order field, list position is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub url: String,
    pub alt: String,
}

/// About section image, displayed by ascending `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutImage {
    pub id: i64,
    pub url: String,
    pub alt: String,
    pub order: i64,
}

/// Interior gallery image, displayed by ascending `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorImage {
    pub id: i64,
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: i64,
}

/// Create payload shared by all three collections; the store assigns
/// the id (and the order where the collection has one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCreate {
    pub url: String,
    pub alt: String,
    pub description: Option<String>,
    pub order: Option<i64>,
}
