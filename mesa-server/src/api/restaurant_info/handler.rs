//! Restaurant Info API Handlers
//!
//! The dashboard merges old + new before submitting; the store always
//! replaces the singleton whole.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::RestaurantInfo;

/// GET /api/restaurant-info
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<RestaurantInfo>> {
    Ok(Json(state.content.restaurant_info().await?))
}

/// PUT /api/restaurant-info - full-record replace
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantInfo>,
) -> AppResult<Json<RestaurantInfo>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Restaurant name must not be empty".to_string(),
        ));
    }
    Ok(Json(state.content.set_restaurant_info(payload).await?))
}
