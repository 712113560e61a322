//! Menu Item Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort order assigned to items that were never explicitly ordered,
/// so they sink below everything the admin has arranged.
pub const UNORDERED_SORT: i64 = 9999;

/// 2D pan/zoom transform applied to a menu image in the admin cropper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for ImagePosition {
    fn default() -> Self {
        // Centered, no zoom
        Self {
            x: 50.0,
            y: 50.0,
            zoom: 1.0,
        }
    }
}

/// Per-language override for a menu item's display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemTranslation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Menu item entity
///
/// `price` is a free-form display string ("12,50 €"), never parsed as a
/// number. `images` and `images_positions` are index-aligned when both
/// are present; use [`MenuItem::remove_gallery_image`] to keep them so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Category reference (name, must exist in the category list)
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Gallery images (max 5, enforced at the editing boundary)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Preparation options text shown below the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_position: Option<ImagePosition>,
    /// One position per gallery image, index-aligned with `images`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_positions: Option<Vec<ImagePosition>>,
    /// Per-language name/description overrides, keyed by language code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, MenuItemTranslation>>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_sort_order")]
    pub sort_order: i64,
}

fn default_sort_order() -> i64 {
    UNORDERED_SORT
}

impl MenuItem {
    /// Remove the gallery image at `index` together with its paired
    /// position, preserving the relative order of the rest.
    ///
    /// Returns `false` when the index is out of range (nothing changes).
    pub fn remove_gallery_image(&mut self, index: usize) -> bool {
        let Some(images) = self.images.as_mut() else {
            return false;
        };
        if index >= images.len() {
            return false;
        }
        images.remove(index);
        if let Some(positions) = self.images_positions.as_mut()
            && index < positions.len()
        {
            positions.remove(index);
        }
        true
    }

    /// Whether `images` and `images_positions` agree in length
    /// (vacuously true when either side is absent).
    pub fn gallery_aligned(&self) -> bool {
        match (&self.images, &self.images_positions) {
            (Some(images), Some(positions)) => images.len() == positions.len(),
            _ => true,
        }
    }
}

/// Create/update payload: the full record minus the id, which comes
/// from the store on create and from the path on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub preparation: Option<String>,
    pub image_position: Option<ImagePosition>,
    pub images_positions: Option<Vec<ImagePosition>>,
    pub translations: Option<BTreeMap<String, MenuItemTranslation>>,
    #[serde(default)]
    pub hidden: bool,
    pub sort_order: Option<i64>,
}

impl MenuItemPayload {
    /// Materialize a full record with the given id. A missing sort order
    /// falls back to [`UNORDERED_SORT`].
    pub fn into_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            images: self.images,
            preparation: self.preparation,
            image_position: self.image_position,
            images_positions: self.images_positions,
            translations: self.translations,
            hidden: self.hidden,
            sort_order: self.sort_order.unwrap_or(UNORDERED_SORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_gallery(count: usize) -> MenuItem {
        MenuItem {
            id: "1".to_string(),
            name: "Bacalhau".to_string(),
            description: "House classic".to_string(),
            price: "14,50 €".to_string(),
            category: "Mains".to_string(),
            image: None,
            images: Some((0..count).map(|i| format!("/img/{i}.jpg")).collect()),
            preparation: None,
            image_position: None,
            images_positions: Some(
                (0..count)
                    .map(|i| ImagePosition {
                        x: i as f64,
                        y: 50.0,
                        zoom: 1.0,
                    })
                    .collect(),
            ),
            translations: None,
            hidden: false,
            sort_order: 1,
        }
    }

    #[test]
    fn remove_gallery_image_keeps_arrays_aligned() {
        let mut item = item_with_gallery(3);
        assert!(item.remove_gallery_image(1));
        assert!(item.gallery_aligned());
        assert_eq!(item.images.as_ref().unwrap().len(), 2);
        // Remaining entries keep their original relative order
        assert_eq!(item.images.as_ref().unwrap()[0], "/img/0.jpg");
        assert_eq!(item.images.as_ref().unwrap()[1], "/img/2.jpg");
        assert_eq!(item.images_positions.as_ref().unwrap()[1].x, 2.0);
    }

    #[test]
    fn remove_gallery_image_out_of_range_is_noop() {
        let mut item = item_with_gallery(2);
        assert!(!item.remove_gallery_image(5));
        assert_eq!(item.images.as_ref().unwrap().len(), 2);
        assert!(item.gallery_aligned());
    }

    #[test]
    fn serde_defaults_apply_to_minimal_record() {
        let json = r#"{
            "id": "3",
            "name": "Caldo verde",
            "description": "Kale soup",
            "price": "6 €",
            "category": "Soups"
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert!(!item.hidden);
        assert_eq!(item.sort_order, UNORDERED_SORT);
        assert!(item.images.is_none());
    }

    #[test]
    fn persisted_keys_are_camel_case() {
        let item = item_with_gallery(1);
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("imagesPositions").is_some());
        assert!(value.get("sortOrder").is_some());
        assert!(value.get("images_positions").is_none());
    }
}
