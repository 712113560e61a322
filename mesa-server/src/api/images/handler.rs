//! Image Collections API Handlers
//!
//! The three collections share routes, dispatched on the `{kind}` path
//! segment. Public list reads absorb I/O failures into an empty list so
//! a broken content file never blanks the whole page; writes propagate.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::core::ServerState;
use crate::store::StoreError;
use crate::utils::{AppError, AppResult};
use shared::models::{AboutImage, GalleryImage, ImageCreate, ImageKind, InteriorImage};

fn parse_kind(kind: &str) -> Result<ImageKind, AppError> {
    ImageKind::parse(kind)
        .ok_or_else(|| AppError::Invalid(format!("Unknown image collection '{kind}'")))
}

fn to_json<T: serde::Serialize>(value: T) -> AppResult<Json<Value>> {
    Ok(Json(serde_json::to_value(value).map_err(|e| {
        AppError::Internal(format!("Serialization failure: {e}"))
    })?))
}

/// Read failures degrade to an empty list on the public read path only.
fn absorb_read_failure<T>(result: Result<Vec<T>, StoreError>, kind: ImageKind) -> Vec<T> {
    match result {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(%kind, error = %e, "image list unavailable, serving empty");
            Vec::new()
        }
    }
}

/// GET /api/images/{kind}
pub async fn list(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Value>> {
    let kind = parse_kind(&kind)?;
    match kind {
        ImageKind::Gallery => {
            to_json(absorb_read_failure(state.content.gallery_images().await, kind))
        }
        ImageKind::About => to_json(absorb_read_failure(state.content.about_images().await, kind)),
        ImageKind::Interior => {
            to_json(absorb_read_failure(state.content.interior_images().await, kind))
        }
    }
}

/// POST /api/images/{kind}
pub async fn create(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    Json(payload): Json<ImageCreate>,
) -> AppResult<Json<Value>> {
    let kind = parse_kind(&kind)?;
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation("Image url must not be empty".to_string()));
    }
    match kind {
        ImageKind::Gallery => to_json(state.content.add_gallery_image(payload).await?),
        ImageKind::About => to_json(state.content.add_about_image(payload).await?),
        ImageKind::Interior => to_json(state.content.add_interior_image(payload).await?),
    }
}

/// DELETE /api/images/{kind}/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path((kind, id)): Path<(String, i64)>,
) -> AppResult<Json<bool>> {
    match parse_kind(&kind)? {
        ImageKind::Gallery => state.content.delete_gallery_image(id).await?,
        ImageKind::About => state.content.delete_about_image(id).await?,
        ImageKind::Interior => state.content.delete_interior_image(id).await?,
    }
    Ok(Json(true))
}

/// PUT /api/images/{kind}/reorder - submit the full list in display order
pub async fn reorder(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    Json(images): Json<Value>,
) -> AppResult<Json<Value>> {
    let kind = parse_kind(&kind)?;
    let shape_error =
        |e: serde_json::Error| AppError::Validation(format!("Malformed {kind} image list: {e}"));
    match kind {
        ImageKind::Gallery => {
            let images: Vec<GalleryImage> = serde_json::from_value(images).map_err(shape_error)?;
            to_json(state.content.reorder_gallery(images).await?)
        }
        ImageKind::About => {
            let images: Vec<AboutImage> = serde_json::from_value(images).map_err(shape_error)?;
            to_json(state.content.reorder_about(images).await?)
        }
        ImageKind::Interior => {
            let images: Vec<InteriorImage> = serde_json::from_value(images).map_err(shape_error)?;
            to_json(state.content.reorder_interior(images).await?)
        }
    }
}
