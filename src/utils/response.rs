use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every response, success or failure, carries the same envelope: a
/// success flag, a server timestamp, and a human-readable message. The
/// payload and the validation-error list appear only when present.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

fn send<T>(
    status: StatusCode,
    success: bool,
    message: impl Into<String>,
    data: Option<T>,
    errors: Option<Vec<String>>,
) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success,
        timestamp: Utc::now(),
        message: message.into(),
        data,
        errors,
    };
    (status, Json(body)).into_response()
}

pub fn success<T>(message: impl Into<String>, data: T) -> Response
where
    T: Serialize,
{
    send(StatusCode::OK, true, message, Some(data), None)
}

pub fn created<T>(message: impl Into<String>, data: T) -> Response
where
    T: Serialize,
{
    send(StatusCode::CREATED, true, message, Some(data), None)
}

pub fn empty_success(message: impl Into<String>) -> Response {
    send::<()>(StatusCode::OK, true, message, None, None)
}

pub fn error(status: StatusCode, message: impl Into<String>, errors: Option<Vec<String>>) -> Response {
    send::<()>(status, false, message, None, errors)
}
