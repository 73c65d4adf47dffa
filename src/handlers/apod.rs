use crate::error::{ApiError, ErrorResponse};
use crate::handlers::{relay, Inbound};
use crate::route_table::RouteId;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// GET /api/apod handler - Astronomy picture of the day
#[utoipa::path(
    get,
    path = routes::APOD,
    responses(
        (status = 200, description = "Upstream APOD record, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "apod"
)]
pub async fn apod_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    relay(&state, RouteId::Apod, &Inbound::default()).await
}
