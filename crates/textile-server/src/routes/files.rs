use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use textile_store::{sanitize_name, StoreError};

use super::AppState;
use crate::response::{self, ApiResponse};

pub fn routes() -> Router<AppState> {
    Router::new().route("/files/{file_name}", get(download))
}

async fn download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, (StatusCode, Json<ApiResponse>)> {
    // Strip directory segments before touching the upload dir.
    let name = sanitize_name(&file_name);
    if name.is_empty() {
        return Err(response::not_found("file not found"));
    }

    let data = state.service.store().read(&name).await.map_err(|e| match e {
        StoreError::NotFound(_) => response::not_found("file not found"),
        other => response::error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    let mime = mime_guess::from_path(&name).first_or_octet_stream();
    Ok(Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        )
        .body(Body::from(data))
        .unwrap())
}
