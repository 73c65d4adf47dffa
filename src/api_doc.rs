use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{AssetDetailsResponse, HelloResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "space-relay API",
        version = "1.0.0",
        description = "Relay for public space-agency APIs that injects the server-held API key"
    ),
    paths(
        handlers::health::hello_handler,
        handlers::apod::apod_handler,
        handlers::mars::mars_photos_handler,
        handlers::mars::rover_manifest_handler,
        handlers::epic::epic_images_handler,
        handlers::epic::epic_by_date_handler,
        handlers::epic::epic_available_handler,
        handlers::epic::epic_archive_handler,
        handlers::asteroids::asteroid_feed_handler,
        handlers::asteroids::asteroid_lookup_handler,
        handlers::asteroids::asteroid_browse_handler,
        handlers::images::image_search_handler,
        handlers::images::image_asset_handler,
        handlers::images::image_metadata_handler,
        handlers::images::image_captions_handler,
        handlers::images::asset_details_handler
    ),
    components(
        schemas(
            HelloResponse,
            AssetDetailsResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "apod", description = "Astronomy picture of the day"),
        (name = "mars", description = "Mars rover photos and manifests"),
        (name = "epic", description = "Earth Polychromatic Imaging Camera"),
        (name = "asteroids", description = "Near-Earth object web service"),
        (name = "images", description = "Image and video library")
    )
)]
pub struct ApiDoc;
