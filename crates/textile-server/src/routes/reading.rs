use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use textile_core::task::TaskStatus;

use super::{to_error, AppState};
use crate::response::{self, ApiResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reading/upload", post(upload))
        .route("/api/reading/task/{task_id}", get(get_task))
        .route("/api/reading/tasks/user/{user_id}", get(get_user_tasks))
        .route("/api/reading/task/{task_id}/status", put(update_status))
}

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut user_id: Option<i64> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| response::bad_request(format!("invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "user_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| response::bad_request(format!("invalid user_id field: {e}")))?;
                let parsed = text
                    .trim()
                    .parse()
                    .map_err(|_| response::bad_request("invalid user id format"))?;
                user_id = Some(parsed);
            }
            "file" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| response::bad_request(format!("invalid file field: {e}")))?;
                file = Some((name, data));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| response::bad_request("user id is required"))?;
    let (name, data) = file.ok_or_else(|| response::bad_request("file is required"))?;

    let result = state
        .service
        .create_task(user_id, &name, data)
        .await
        .map_err(to_error)?;
    Ok(response::success("reading task created", Some(json!(result))))
}

async fn get_task(State(state): State<AppState>, Path(task_id): Path<String>) -> ApiResult {
    let task_id: i64 = task_id
        .parse()
        .map_err(|_| response::bad_request("invalid task id format"))?;

    match state.service.get_task(task_id).map_err(to_error)? {
        Some(task) => Ok(response::success("ok", Some(json!(task)))),
        None => Err(response::not_found("task not found")),
    }
}

async fn get_user_tasks(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult {
    let user_id: i64 = user_id
        .parse()
        .map_err(|_| response::bad_request("invalid user id format"))?;

    let tasks = state.service.list_user_tasks(user_id).map_err(to_error)?;
    Ok(response::success("ok", Some(json!(tasks))))
}

#[derive(Debug, Deserialize)]
struct UpdateStatusBody {
    status: String,
}

async fn update_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    body: String,
) -> ApiResult {
    let task_id: i64 = task_id
        .parse()
        .map_err(|_| response::bad_request("invalid task id format"))?;

    let body: UpdateStatusBody = serde_json::from_str(&body)
        .map_err(|e| response::bad_request(format!("invalid request body: {e}")))?;

    let status = TaskStatus::parse_str(&body.status).ok_or_else(|| {
        response::bad_request(
            "invalid status value, must be one of: pending, processing, completed, failed",
        )
    })?;

    state
        .service
        .update_status(task_id, status)
        .map_err(to_error)?;
    Ok(response::success("status updated", None))
}
