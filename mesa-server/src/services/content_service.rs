//! Content Service: image collections and restaurant info
//!
//! Everything here lives in the `restaurant` structured file, always
//! read and written as one unit: the info singleton plus the three
//! image collections. Read failures on the public list endpoints are
//! absorbed into empty lists at the API boundary, not here; write
//! failures always propagate.

use crate::store::source_file::{put_export, take_export_or_default};
use crate::store::{RESTAURANT_FILE, SourceFileStore, StoreError, StoreResult, ids};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{AboutImage, GalleryImage, ImageCreate, InteriorImage, RestaurantInfo};
use std::collections::BTreeMap;

/// In-memory image of the restaurant logical file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RestaurantContent {
    info: RestaurantInfo,
    gallery: Vec<GalleryImage>,
    about: Vec<AboutImage>,
    interior: Vec<InteriorImage>,
}

impl RestaurantContent {
    fn from_values(values: &BTreeMap<String, Value>) -> Self {
        Self {
            info: take_export_or_default(values, "restaurantInfo"),
            gallery: take_export_or_default(values, "galleryImages"),
            about: take_export_or_default(values, "aboutImages"),
            interior: take_export_or_default(values, "interiorImages"),
        }
    }

    fn to_values(&self) -> StoreResult<BTreeMap<String, Value>> {
        let mut values = BTreeMap::new();
        put_export(&mut values, "restaurantInfo", &self.info)?;
        put_export(&mut values, "galleryImages", &self.gallery)?;
        put_export(&mut values, "aboutImages", &self.about)?;
        put_export(&mut values, "interiorImages", &self.interior)?;
        Ok(values)
    }
}

#[derive(Clone)]
pub struct ContentService {
    files: SourceFileStore,
}

impl ContentService {
    pub fn new(files: SourceFileStore) -> Self {
        Self { files }
    }

    async fn load(&self) -> StoreResult<RestaurantContent> {
        let values = self.files.read(&RESTAURANT_FILE).await?;
        Ok(RestaurantContent::from_values(&values))
    }

    /// Load for a write: a missing file starts from empty content.
    async fn load_or_empty(&self) -> StoreResult<RestaurantContent> {
        let values = self.files.read_or_empty(&RESTAURANT_FILE).await?;
        Ok(RestaurantContent::from_values(&values))
    }

    async fn save(&self, content: &RestaurantContent) -> StoreResult<()> {
        self.files.write(&RESTAURANT_FILE, &content.to_values()?).await
    }

    // ========== Gallery (insertion order is display order) ==========

    pub async fn gallery_images(&self) -> StoreResult<Vec<GalleryImage>> {
        Ok(self.load().await?.gallery)
    }

    pub async fn add_gallery_image(&self, payload: ImageCreate) -> StoreResult<GalleryImage> {
        let mut content = self.load_or_empty().await?;
        let image = GalleryImage {
            id: ids::next_id(content.gallery.iter().map(|i| i.id)),
            url: payload.url,
            alt: payload.alt,
        };
        content.gallery.push(image.clone());
        self.save(&content).await?;
        Ok(image)
    }

    pub async fn delete_gallery_image(&self, id: i64) -> StoreResult<()> {
        let mut content = self.load_or_empty().await?;
        let before = content.gallery.len();
        content.gallery.retain(|i| i.id != id);
        if content.gallery.len() == before {
            return Err(StoreError::NotFound(format!("Gallery image {id} not found")));
        }
        self.save(&content).await
    }

    /// Store the submitted sequence verbatim; the list position is the
    /// display order for this collection.
    pub async fn reorder_gallery(&self, images: Vec<GalleryImage>) -> StoreResult<Vec<GalleryImage>> {
        let mut content = self.load_or_empty().await?;
        content.gallery = images;
        self.save(&content).await?;
        Ok(content.gallery)
    }

    // ========== About images (explicit order field) ==========

    pub async fn about_images(&self) -> StoreResult<Vec<AboutImage>> {
        let mut images = self.load().await?.about;
        images.sort_by_key(|i| i.order);
        Ok(images)
    }

    pub async fn add_about_image(&self, payload: ImageCreate) -> StoreResult<AboutImage> {
        let mut content = self.load_or_empty().await?;
        let image = AboutImage {
            id: ids::next_id(content.about.iter().map(|i| i.id)),
            url: payload.url,
            alt: payload.alt,
            order: payload
                .order
                .unwrap_or_else(|| ids::next_order(content.about.iter().map(|i| Some(i.order)))),
        };
        content.about.push(image.clone());
        self.save(&content).await?;
        Ok(image)
    }

    pub async fn delete_about_image(&self, id: i64) -> StoreResult<()> {
        let mut content = self.load_or_empty().await?;
        let before = content.about.len();
        content.about.retain(|i| i.id != id);
        if content.about.len() == before {
            return Err(StoreError::NotFound(format!("About image {id} not found")));
        }
        // No renumbering on delete; the client reorder does that
        self.save(&content).await
    }

    /// Renumber the submitted display sequence 1..n and persist it.
    pub async fn reorder_about(&self, mut images: Vec<AboutImage>) -> StoreResult<Vec<AboutImage>> {
        ids::renumber(&mut images, |image, order| image.order = order);
        let mut content = self.load_or_empty().await?;
        content.about = images;
        self.save(&content).await?;
        Ok(content.about)
    }

    // ========== Interior images (explicit order field) ==========

    pub async fn interior_images(&self) -> StoreResult<Vec<InteriorImage>> {
        let mut images = self.load().await?.interior;
        images.sort_by_key(|i| i.order);
        Ok(images)
    }

    pub async fn add_interior_image(&self, payload: ImageCreate) -> StoreResult<InteriorImage> {
        let mut content = self.load_or_empty().await?;
        let image = InteriorImage {
            id: ids::next_id(content.interior.iter().map(|i| i.id)),
            url: payload.url,
            alt: payload.alt,
            description: payload.description,
            order: payload
                .order
                .unwrap_or_else(|| ids::next_order(content.interior.iter().map(|i| Some(i.order)))),
        };
        content.interior.push(image.clone());
        self.save(&content).await?;
        Ok(image)
    }

    pub async fn delete_interior_image(&self, id: i64) -> StoreResult<()> {
        let mut content = self.load_or_empty().await?;
        let before = content.interior.len();
        content.interior.retain(|i| i.id != id);
        if content.interior.len() == before {
            return Err(StoreError::NotFound(format!("Interior image {id} not found")));
        }
        self.save(&content).await
    }

    pub async fn reorder_interior(
        &self,
        mut images: Vec<InteriorImage>,
    ) -> StoreResult<Vec<InteriorImage>> {
        ids::renumber(&mut images, |image, order| image.order = order);
        let mut content = self.load_or_empty().await?;
        content.interior = images;
        self.save(&content).await?;
        Ok(content.interior)
    }

    // ========== Restaurant info (singleton) ==========

    pub async fn restaurant_info(&self) -> StoreResult<RestaurantInfo> {
        Ok(self.load_or_empty().await?.info)
    }

    /// Replace the singleton whole. The boundary merges old + new
    /// before calling this; the store never patches.
    pub async fn set_restaurant_info(&self, info: RestaurantInfo) -> StoreResult<RestaurantInfo> {
        let mut content = self.load_or_empty().await?;
        content.info = info;
        self.save(&content).await?;
        Ok(content.info)
    }
}
