// Route path constants - single source of truth for all API paths

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const HELLO: &str = "/api/hello";
pub const APOD: &str = "/api/apod";
pub const MARS_PHOTOS: &str = "/api/marsPhotos/{rover}";
pub const ROVER_MANIFEST: &str = "/api/manifests/{rover}";
pub const EPIC_IMAGES: &str = "/api/epic/{imageType}/images";
pub const EPIC_BY_DATE: &str = "/api/epic/{imageType}/date/{date}";
pub const EPIC_AVAILABLE: &str = "/api/epic/{imageType}/available";
// Last segment is `<imageName>.png`; the handler checks and strips the suffix.
pub const EPIC_ARCHIVE: &str = "/api/epic/archive/{imageType}/{year}/{month}/{day}/png/{imageFile}";
pub const ASTEROID_FEED: &str = "/api/asteroids/feed";
pub const ASTEROID_LOOKUP: &str = "/api/asteroids/lookup/{asteroidId}";
pub const ASTEROID_BROWSE: &str = "/api/asteroids/browse";
pub const IMAGE_SEARCH: &str = "/api/nasaImages/search";
pub const IMAGE_ASSET: &str = "/api/nasaImages/asset/{nasa_id}";
pub const IMAGE_METADATA: &str = "/api/nasaImages/metadata/{nasa_id}";
pub const IMAGE_CAPTIONS: &str = "/api/nasaImages/captions/{nasa_id}";
pub const IMAGE_DETAILS: &str = "/api/nasaImages/details/{nasa_id}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full relay router over the shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HELLO, get(handlers::hello_handler))
        .route(APOD, get(handlers::apod_handler))
        .route(MARS_PHOTOS, get(handlers::mars_photos_handler))
        .route(ROVER_MANIFEST, get(handlers::rover_manifest_handler))
        .route(EPIC_IMAGES, get(handlers::epic_images_handler))
        .route(EPIC_BY_DATE, get(handlers::epic_by_date_handler))
        .route(EPIC_AVAILABLE, get(handlers::epic_available_handler))
        .route(EPIC_ARCHIVE, get(handlers::epic_archive_handler))
        .route(ASTEROID_FEED, get(handlers::asteroid_feed_handler))
        .route(ASTEROID_LOOKUP, get(handlers::asteroid_lookup_handler))
        .route(ASTEROID_BROWSE, get(handlers::asteroid_browse_handler))
        .route(IMAGE_SEARCH, get(handlers::image_search_handler))
        .route(IMAGE_ASSET, get(handlers::image_asset_handler))
        .route(IMAGE_METADATA, get(handlers::image_metadata_handler))
        .route(IMAGE_CAPTIONS, get(handlers::image_captions_handler))
        .route(IMAGE_DETAILS, get(handlers::asset_details_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
