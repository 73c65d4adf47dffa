use crate::error::{ApiError, ErrorResponse};
use crate::handlers::{relay, Inbound};
use crate::route_table::RouteId;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::State,
    response::Response,
};

/// GET /api/asteroids/feed handler - Near-Earth objects by approach date
///
/// Query parameters:
/// - start_date: First day, YYYY-MM-DD (optional)
/// - end_date: Last day, YYYY-MM-DD (optional)
#[utoipa::path(
    get,
    path = routes::ASTEROID_FEED,
    params(
        ("start_date" = Option<String>, Query, description = "First day, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Last day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Upstream feed, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "asteroids"
)]
pub async fn asteroid_feed_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::AsteroidFeed, &inbound).await
}

/// GET /api/asteroids/lookup/:asteroidId handler - One near-Earth object
#[utoipa::path(
    get,
    path = routes::ASTEROID_LOOKUP,
    params(
        ("asteroidId" = String, Path, description = "SPK-ID of the asteroid")
    ),
    responses(
        (status = 200, description = "Upstream object record, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "asteroids"
)]
pub async fn asteroid_lookup_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::AsteroidLookup, &inbound).await
}

/// GET /api/asteroids/browse handler - Paged near-Earth object catalogue
#[utoipa::path(
    get,
    path = routes::ASTEROID_BROWSE,
    responses(
        (status = 200, description = "Upstream catalogue page, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "asteroids"
)]
pub async fn asteroid_browse_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    relay(&state, RouteId::AsteroidBrowse, &Inbound::default()).await
}
