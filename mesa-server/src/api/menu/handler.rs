//! Menu API Handlers
//!
//! Boundary validation happens here (ValidationFailure never reaches a
//! store tier); the fallback chain itself lives in the menu service.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::services::{Menu, MenuTier};
use crate::utils::{AppError, AppResult};
use shared::models::{MenuItem, MenuItemPayload};

/// Gallery limit enforced at the editing boundary, not by the stores.
const MAX_GALLERY_IMAGES: usize = 5;

fn validate_item(payload: &MenuItemPayload) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Item name must not be empty".to_string()));
    }
    if payload.category.trim().is_empty() {
        return Err(AppError::Validation("Item category must not be empty".to_string()));
    }
    if let Some(images) = &payload.images {
        if images.len() > MAX_GALLERY_IMAGES {
            return Err(AppError::Validation(format!(
                "At most {MAX_GALLERY_IMAGES} gallery images are allowed"
            )));
        }
        if let Some(positions) = &payload.images_positions
            && positions.len() != images.len()
        {
            return Err(AppError::Validation(
                "imagesPositions must align with images".to_string(),
            ));
        }
    } else if payload.images_positions.is_some() {
        return Err(AppError::Validation(
            "imagesPositions without images".to_string(),
        ));
    }
    Ok(())
}

fn note_fallback(op: &str, tier: MenuTier) {
    if tier == MenuTier::File {
        tracing::warn!(op, "write applied to the file tier (database fallback)");
    }
}

/// GET /api/menu - items plus categories from the first tier that yields data
pub async fn list(State(state): State<ServerState>) -> Json<Menu> {
    Json(state.menu.list_menu().await)
}

/// POST /api/menu/items - create a menu item
pub async fn create_item(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemPayload>,
) -> AppResult<Json<MenuItem>> {
    validate_item(&payload)?;
    let outcome = state.menu.add_item(payload).await?;
    note_fallback("create_item", outcome.tier);
    Ok(Json(outcome.value))
}

/// PUT /api/menu/items/{id} - full-record replace
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemPayload>,
) -> AppResult<Json<MenuItem>> {
    validate_item(&payload)?;
    let outcome = state.menu.update_item(&id, payload).await?;
    note_fallback("update_item", outcome.tier);
    Ok(Json(outcome.value))
}

/// DELETE /api/menu/items/{id}
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let outcome = state.menu.delete_item(&id).await?;
    note_fallback("delete_item", outcome.tier);
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPair {
    pub id: String,
    pub sort_order: i64,
}

/// PUT /api/menu/items/reorder - apply id→order pairs verbatim
pub async fn reorder_items(
    State(state): State<ServerState>,
    Json(pairs): Json<Vec<ReorderPair>>,
) -> AppResult<Json<bool>> {
    let pairs: Vec<(String, i64)> = pairs.into_iter().map(|p| (p.id, p.sort_order)).collect();
    let outcome = state.menu.reorder_items(pairs).await?;
    note_fallback("reorder_items", outcome.tier);
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// POST /api/menu/categories
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Vec<String>>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "Category name must not be empty".to_string(),
        ));
    }
    let outcome = state.menu.add_category(name).await?;
    note_fallback("create_category", outcome.tier);
    Ok(Json(outcome.value))
}

/// DELETE /api/menu/categories/{name}
pub async fn delete_category(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let outcome = state.menu.delete_category(&name).await?;
    note_fallback("delete_category", outcome.tier);
    Ok(Json(outcome.value))
}

#[derive(Debug, Serialize)]
pub struct MenuBackup {
    pub items: Vec<MenuItem>,
    pub categories: Vec<String>,
}

/// GET /api/menu/export - dump the database tier (no fallback)
pub async fn export_backup(State(state): State<ServerState>) -> AppResult<Json<MenuBackup>> {
    let (items, categories) = state.menu.export_backup().await?;
    Ok(Json(MenuBackup { items, categories }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub item_count: usize,
    pub category_count: usize,
}

/// POST /api/menu/migrate - copy the file tier into the database
pub async fn migrate(State(state): State<ServerState>) -> AppResult<Json<MigrationReport>> {
    let (item_count, category_count) = state.menu.migrate_from_file().await?;
    Ok(Json(MigrationReport {
        item_count,
        category_count,
    }))
}
