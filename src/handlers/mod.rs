//! Axum handlers. Each one decodes the request, hands it to a service and
//! wraps the result in the response envelope; no business rule lives here.

use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod auth;
pub mod courts;
pub mod reservations;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    success(
        "Health check successful",
        HealthPayload {
            status: "ok",
            service: "canchas-api",
        },
    )
}
