//! Hero Slide Service
//!
//! Hero slides persist in the flat-JSON store only. No fallback chain
//! and no backup sibling, this content's absence is not catastrophic.
//! Slide `order` is assigned at creation as count + 1 and never
//! renumbered on delete.

use crate::store::{JsonFileStore, StoreError, StoreResult, ids};
use shared::models::{HeroSlide, HeroSlidePayload};

const HERO_FILE: &str = "hero-slides.json";

#[derive(Clone)]
pub struct HeroService {
    store: JsonFileStore,
}

impl HeroService {
    pub fn new(store: JsonFileStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<HeroSlide> {
        self.store.read(HERO_FILE).await
    }

    /// Slides visible on the public page, by ascending order.
    pub async fn list_active(&self) -> Vec<HeroSlide> {
        let mut slides: Vec<HeroSlide> = self.list().await;
        slides.retain(|s| s.active);
        slides.sort_by_key(|s| s.order);
        slides
    }

    pub async fn add(&self, payload: HeroSlidePayload) -> StoreResult<HeroSlide> {
        let mut slides = self.list().await;
        let slide = HeroSlide {
            id: ids::next_string_id(slides.iter().map(|s| s.id.as_str())),
            title: payload.title,
            subtitle: payload.subtitle,
            description: payload.description,
            image: payload.image,
            media_type: payload.media_type,
            active: payload.active,
            order: slides.len() as i64 + 1,
        };
        slides.push(slide.clone());
        self.store.write(HERO_FILE, &slides).await?;
        Ok(slide)
    }

    pub async fn update(&self, id: &str, payload: HeroSlidePayload) -> StoreResult<HeroSlide> {
        let mut slides = self.list().await;
        let Some(slot) = slides.iter_mut().find(|s| s.id == id) else {
            return Err(StoreError::NotFound(format!("Hero slide {id} not found")));
        };
        let slide = HeroSlide {
            id: slot.id.clone(),
            title: payload.title,
            subtitle: payload.subtitle,
            description: payload.description,
            image: payload.image,
            media_type: payload.media_type,
            active: payload.active,
            order: payload.order.unwrap_or(slot.order),
        };
        *slot = slide.clone();
        self.store.write(HERO_FILE, &slides).await?;
        Ok(slide)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut slides = self.list().await;
        let before = slides.len();
        slides.retain(|s| s.id != id);
        if slides.len() == before {
            return Err(StoreError::NotFound(format!("Hero slide {id} not found")));
        }
        // Surviving orders are left as they are
        self.store.write(HERO_FILE, &slides).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MediaType;
    use tempfile::TempDir;

    fn service() -> (TempDir, HeroService) {
        let dir = TempDir::new().unwrap();
        let service = HeroService::new(JsonFileStore::new(dir.path()));
        (dir, service)
    }

    fn payload(title: &str) -> HeroSlidePayload {
        HeroSlidePayload {
            title: title.to_string(),
            subtitle: "sub".to_string(),
            description: "desc".to_string(),
            image: "/hero.jpg".to_string(),
            media_type: MediaType::Image,
            active: true,
            order: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_numeric_string_id_and_order() {
        let (_dir, service) = service();
        let a = service.add(payload("A")).await.unwrap();
        let b = service.add(payload("B")).await.unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(a.order, 1);
        assert_eq!(b.order, 2);
    }

    #[tokio::test]
    async fn delete_leaves_survivor_orders_untouched() {
        let (_dir, service) = service();
        let a = service.add(payload("A")).await.unwrap();
        let _b = service.add(payload("B")).await.unwrap();
        let c = service.add(payload("C")).await.unwrap();
        service.delete(&a.id).await.unwrap();
        let slides = service.list().await;
        assert_eq!(slides.len(), 2);
        assert_eq!(slides.iter().find(|s| s.id == c.id).unwrap().order, 3);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (_dir, service) = service();
        let err = service.update("9", payload("X")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn inactive_slides_are_hidden_from_public_list() {
        let (_dir, service) = service();
        let a = service.add(payload("A")).await.unwrap();
        let mut hidden = payload("B");
        hidden.active = false;
        service.add(hidden).await.unwrap();
        let active = service.list_active().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a.id);
    }
}
