//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/items", post(handler::create_item))
        // Batch sort order update (must be before /{id} to avoid path conflicts)
        .route("/items/reorder", put(handler::reorder_items))
        .route(
            "/items/{id}",
            put(handler::update_item).delete(handler::delete_item),
        )
        .route("/categories", post(handler::create_category))
        .route("/categories/{name}", axum::routing::delete(handler::delete_category))
        .route("/export", get(handler::export_backup))
        .route("/migrate", post(handler::migrate))
}
