use crate::models::HelloResponse;
use crate::routes;
use axum::{http::StatusCode, Json};

/// GET /api/hello handler - Liveness probe
///
/// Answers locally without touching any upstream.
#[utoipa::path(
    get,
    path = routes::HELLO,
    responses(
        (status = 200, description = "Relay is up", body = HelloResponse)
    ),
    tag = "health"
)]
pub async fn hello_handler() -> (StatusCode, Json<HelloResponse>) {
    tracing::debug!("Hello probe answered");
    (
        StatusCode::OK,
        Json(HelloResponse {
            message: "Hello from the server!".to_string(),
        }),
    )
}
