use crate::error::{ApiError, ErrorResponse};
use crate::handlers::{relay, Inbound};
use crate::route_table::RouteId;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::State,
    response::Response,
};

/// GET /api/epic/:imageType/images handler - Most recent EPIC images
#[utoipa::path(
    get,
    path = routes::EPIC_IMAGES,
    params(
        ("imageType" = String, Path, description = "Collection: natural, enhanced, aerosol or cloud")
    ),
    responses(
        (status = 200, description = "Upstream image list, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "epic"
)]
pub async fn epic_images_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::EpicImages, &inbound).await
}

/// GET /api/epic/:imageType/date/:date handler - EPIC images for one day
#[utoipa::path(
    get,
    path = routes::EPIC_BY_DATE,
    params(
        ("imageType" = String, Path, description = "Collection: natural, enhanced, aerosol or cloud"),
        ("date" = String, Path, description = "Date as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Upstream image list, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "epic"
)]
pub async fn epic_by_date_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::EpicByDate, &inbound).await
}

/// GET /api/epic/:imageType/available handler - Dates with imagery
#[utoipa::path(
    get,
    path = routes::EPIC_AVAILABLE,
    params(
        ("imageType" = String, Path, description = "Collection: natural, enhanced, aerosol or cloud")
    ),
    responses(
        (status = 200, description = "Upstream date list, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "epic"
)]
pub async fn epic_available_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::EpicAvailable, &inbound).await
}

/// GET /api/epic/archive/:imageType/:year/:month/:day/png/:imageName.png handler
///
/// Streams the PNG straight from the archive with the upstream content type.
#[utoipa::path(
    get,
    path = routes::EPIC_ARCHIVE,
    params(
        ("imageType" = String, Path, description = "Collection: natural, enhanced, aerosol or cloud"),
        ("year" = String, Path, description = "Four-digit year"),
        ("month" = String, Path, description = "Two-digit month"),
        ("day" = String, Path, description = "Two-digit day"),
        ("imageFile" = String, Path, description = "Image name with the .png extension")
    ),
    responses(
        (status = 200, description = "Image bytes with the upstream content type, streamed unchanged"),
        (status = 404, description = "Image file name does not end in .png", body = ErrorResponse),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "epic"
)]
pub async fn epic_archive_handler(
    State(state): State<AppState>,
    mut inbound: Inbound,
) -> Result<Response, ApiError> {
    let image_file = inbound.path.remove("imageFile").unwrap_or_default();
    let image_name = match image_file.strip_suffix(".png") {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            tracing::info!("Rejected archive request for non-PNG file: {}", image_file);
            return Err(ApiError::NotFound(format!("image '{}'", image_file)));
        }
    };
    inbound.path.insert("imageName".to_string(), image_name);

    relay(&state, RouteId::EpicArchive, &inbound).await
}
