use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Standard `{code, message, data}` envelope used by every API route.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub fn success(message: &str, data: Option<Value>) -> Json<ApiResponse> {
    Json(ApiResponse {
        code: 200,
        message: message.to_string(),
        data,
    })
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse>) {
    (
        status,
        Json(ApiResponse {
            code: status.as_u16(),
            message,
            data: None,
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    error(StatusCode::BAD_REQUEST, message.into())
}

pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    error(StatusCode::NOT_FOUND, message.into())
}
