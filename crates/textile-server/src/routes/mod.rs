mod files;
mod health;
mod reading;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::{Json, Router};
use textile_service::{ReadingService, ServiceError};
use tower_http::cors::CorsLayer;

use crate::response::{self, ApiResponse};

/// Raised above the 50 MiB application limit so the service-layer
/// validation answers oversize uploads instead of a framework 413.
const BODY_LIMIT_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReadingService>,
}

pub fn build_router(service: ReadingService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };
    Router::new()
        .merge(health::routes())
        .merge(reading::routes())
        .merge(files::routes())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

fn to_error(e: ServiceError) -> (StatusCode, Json<ApiResponse>) {
    let status = match &e {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    response::error(status, e.to_string())
}
