use crate::error::{ApiError, ErrorResponse};
use crate::handlers::{relay, Inbound};
use crate::route_table::RouteId;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::State,
    response::Response,
};

/// GET /api/marsPhotos/:rover handler - Rover photo search
///
/// Query parameters:
/// - sol: Martian sol (optional, takes precedence over earth_date)
/// - earth_date: Earth date YYYY-MM-DD (optional, ignored when sol is set)
/// - camera: Camera abbreviation (optional, "all" means no filter)
/// - page: Result page (optional)
#[utoipa::path(
    get,
    path = routes::MARS_PHOTOS,
    params(
        ("rover" = String, Path, description = "Rover name, e.g. curiosity"),
        ("sol" = Option<u32>, Query, description = "Martian sol"),
        ("earth_date" = Option<String>, Query, description = "Earth date, used only without sol"),
        ("camera" = Option<String>, Query, description = "Camera abbreviation or 'all'"),
        ("page" = Option<u32>, Query, description = "Result page")
    ),
    responses(
        (status = 200, description = "Upstream photo list, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "mars"
)]
pub async fn mars_photos_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::MarsPhotos, &inbound).await
}

/// GET /api/manifests/:rover handler - Rover mission manifest
#[utoipa::path(
    get,
    path = routes::ROVER_MANIFEST,
    params(
        ("rover" = String, Path, description = "Rover name, e.g. curiosity")
    ),
    responses(
        (status = 200, description = "Upstream mission manifest, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "mars"
)]
pub async fn rover_manifest_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::RoverManifest, &inbound).await
}
