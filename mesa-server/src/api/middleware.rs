//! HTTP middleware
//!
//! Request logging plus the admin gate. Authentication is a
//! collaborator, not part of the stores: the gate reduces it to a
//! yes/no signal per request and the storage layers never see it.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use crate::core::ServerState;
use crate::utils::AppError;

/// Log every request with its id, path, status and latency.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let response = next.run(req).await;
    let status = response.status();
    let latency_ms = start.elapsed().as_millis();

    if status.is_server_error() {
        warn!(request_id = %request_id, %method, %path, %status, latency_ms, "request failed");
    } else {
        info!(request_id = %request_id, %method, %path, %status, latency_ms, "request");
    }

    response
}

/// Gate mutating requests behind the admin bearer token. Safe methods
/// pass through; the public page reads without credentials.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let safe = matches!(
        *req.method(),
        http::Method::GET | http::Method::HEAD | http::Method::OPTIONS
    );
    if safe {
        return next.run(req).await;
    }

    let Some(expected) = state.config.admin_token.as_deref() else {
        // No token configured: development convenience, refused at
        // startup in production
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => next.run(req).await,
        _ => AppError::Unauthorized.into_response(),
    }
}
