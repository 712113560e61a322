//! Image Collections API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/images", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{kind}", get(handler::list).post(handler::create))
        .route("/{kind}/reorder", put(handler::reorder))
        .route("/{kind}/{id}", delete(handler::delete))
}
