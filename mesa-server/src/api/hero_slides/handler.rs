//! Hero Slides API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{HeroSlide, HeroSlidePayload};

fn validate(payload: &HeroSlidePayload) -> Result<(), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Slide title must not be empty".to_string()));
    }
    if payload.image.trim().is_empty() {
        return Err(AppError::Validation("Slide image must not be empty".to_string()));
    }
    Ok(())
}

/// GET /api/hero-slides - all slides (admin view)
pub async fn list(State(state): State<ServerState>) -> Json<Vec<HeroSlide>> {
    Json(state.hero.list().await)
}

/// GET /api/hero-slides/active - visible slides for the public page
pub async fn list_active(State(state): State<ServerState>) -> Json<Vec<HeroSlide>> {
    Json(state.hero.list_active().await)
}

/// POST /api/hero-slides
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HeroSlidePayload>,
) -> AppResult<Json<HeroSlide>> {
    validate(&payload)?;
    Ok(Json(state.hero.add(payload).await?))
}

/// PUT /api/hero-slides/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HeroSlidePayload>,
) -> AppResult<Json<HeroSlide>> {
    validate(&payload)?;
    Ok(Json(state.hero.update(&id, payload).await?))
}

/// DELETE /api/hero-slides/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.hero.delete(&id).await?;
    Ok(Json(true))
}
