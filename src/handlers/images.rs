use std::collections::HashMap;

use crate::error::{ApiError, ErrorResponse};
use crate::handlers::{relay, Inbound};
use crate::models::AssetDetailsResponse;
use crate::route_table::RouteId;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Json,
};

const ASSET_DETAILS: &str = "asset details";

/// GET /api/nasaImages/search handler - Image and video library search
#[utoipa::path(
    get,
    path = routes::IMAGE_SEARCH,
    params(
        ("q" = Option<String>, Query, description = "Free-text search terms")
    ),
    responses(
        (status = 200, description = "Upstream search collection, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn image_search_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::ImageSearch, &inbound).await
}

/// GET /api/nasaImages/asset/:nasa_id handler - Asset manifest
#[utoipa::path(
    get,
    path = routes::IMAGE_ASSET,
    params(
        ("nasa_id" = String, Path, description = "Library item id")
    ),
    responses(
        (status = 200, description = "Upstream asset manifest, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn image_asset_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::ImageAsset, &inbound).await
}

/// GET /api/nasaImages/metadata/:nasa_id handler - Metadata location
#[utoipa::path(
    get,
    path = routes::IMAGE_METADATA,
    params(
        ("nasa_id" = String, Path, description = "Library item id")
    ),
    responses(
        (status = 200, description = "Upstream metadata location, relayed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn image_metadata_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::ImageMetadata, &inbound).await
}

/// GET /api/nasaImages/captions/:nasa_id handler - Video captions
///
/// Caption files can be large, so the body is streamed rather than parsed.
#[utoipa::path(
    get,
    path = routes::IMAGE_CAPTIONS,
    params(
        ("nasa_id" = String, Path, description = "Library item id")
    ),
    responses(
        (status = 200, description = "Caption payload with the upstream content type, streamed unchanged"),
        (status = 500, description = "Upstream or transport failure", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn image_captions_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<Response, ApiError> {
    relay(&state, RouteId::ImageCaptions, &inbound).await
}

/// GET /api/nasaImages/details/:nasa_id handler - Manifest plus metadata
///
/// Fetches the asset manifest, then the metadata, one after the other. A
/// failed manifest fails the request and the metadata call is skipped; a
/// failed metadata call only leaves `metadata` as `null`.
#[utoipa::path(
    get,
    path = routes::IMAGE_DETAILS,
    params(
        ("nasa_id" = String, Path, description = "Library item id")
    ),
    responses(
        (status = 200, description = "Asset manifest and metadata", body = AssetDetailsResponse),
        (status = 500, description = "Asset manifest could not be fetched", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn asset_details_handler(
    State(state): State<AppState>,
    inbound: Inbound,
) -> Result<(StatusCode, Json<AssetDetailsResponse>), ApiError> {
    let path = &inbound.path;
    let no_query = HashMap::new();

    let asset_url = state
        .routes
        .resolve(RouteId::ImageAsset, path, &no_query)
        .map_err(|e| {
            tracing::error!("Cannot build asset manifest URL: {}", e);
            e.fetching(ASSET_DETAILS)
        })?;
    let asset = state
        .forwarder
        .fetch_json(asset_url)
        .await
        .map_err(|e| e.fetching(ASSET_DETAILS))?;

    let metadata = match state.routes.resolve(RouteId::ImageMetadata, path, &no_query) {
        Ok(url) => state.forwarder.fetch_json(url).await,
        Err(e) => Err(e),
    };
    let metadata = match metadata {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::warn!("Metadata unavailable, returning asset manifest alone: {}", e);
            None
        }
    };

    Ok((StatusCode::OK, Json(AssetDetailsResponse { asset, metadata })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, get, test_state, MockResponse, MockUpstream};
    use axum::http::header;
    use serde_json::json;

    fn manifest() -> serde_json::Value {
        json!({"collection": {"items": [{"href": "https://images-assets.nasa.gov/image/as11-40-5874/as11-40-5874~orig.jpg"}]}})
    }

    #[tokio::test]
    async fn test_search_never_sends_key() {
        let results = json!({"collection": {"items": [], "metadata": {"total_hits": 0}}});
        let images = MockUpstream::start(vec![("/search", MockResponse::json(StatusCode::OK, &results))]).await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, Some("secret-key")), "/api/nasaImages/search?q=apollo%2011&api_key=x").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, results);
        assert_eq!(images.requests(), vec!["/search?q=apollo+11".to_string()]);
    }

    #[tokio::test]
    async fn test_asset_and_metadata() {
        let location = json!({"location": "https://images-assets.nasa.gov/image/as11-40-5874/metadata.json"});
        let images = MockUpstream::start(vec![
            ("/asset/as11-40-5874", MockResponse::json(StatusCode::OK, &manifest())),
            ("/metadata/as11-40-5874", MockResponse::json(StatusCode::OK, &location)),
        ])
        .await;
        let api = MockUpstream::closed().await;
        let state = test_state(&api, &images, None);

        let response = get(state.clone(), "/api/nasaImages/asset/as11-40-5874").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, manifest());

        let response = get(state, "/api/nasaImages/metadata/as11-40-5874").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, location);
    }

    #[tokio::test]
    async fn test_captions_stream_keeps_content_type_and_length() {
        let srt = "1\n00:00:00,000 --> 00:00:04,000\nThe Eagle has landed.\n".repeat(2_000);
        let images = MockUpstream::start(vec![(
            "/captions/JSC-20190720",
            MockResponse::bytes(StatusCode::OK, Some("application/x-subrip"), srt.clone()),
        )])
        .await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/captions/JSC-20190720").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-subrip");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), srt.len());
    }

    #[tokio::test]
    async fn test_captions_failure_is_generic_500() {
        let images = MockUpstream::start(vec![]).await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/captions/unknown").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to fetch data"}));
    }

    #[tokio::test]
    async fn test_captions_unreachable_upstream_is_generic_500() {
        let images = MockUpstream::closed().await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/captions/JSC-20190720").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to fetch data"}));
    }

    #[tokio::test]
    async fn test_dot_segment_ids_never_reach_upstream() {
        let images = MockUpstream::start(vec![
            ("/asset", MockResponse::json(StatusCode::OK, &json!({"wrong": "endpoint"}))),
            ("/metadata", MockResponse::json(StatusCode::OK, &json!({"wrong": "endpoint"}))),
        ])
        .await;
        let api = MockUpstream::closed().await;
        let state = test_state(&api, &images, None);

        for uri in ["/api/nasaImages/asset/%2E%2E", "/api/nasaImages/metadata/%2E"] {
            let response = get(state.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(body_json(response).await, json!({"error": "Failed to fetch data"}));
        }

        assert!(images.requests().is_empty());
    }

    #[tokio::test]
    async fn test_details_combines_asset_and_metadata() {
        let location = json!({"location": "https://images-assets.nasa.gov/image/as11-40-5874/metadata.json"});
        let images = MockUpstream::start(vec![
            ("/asset/as11-40-5874", MockResponse::json(StatusCode::OK, &manifest())),
            ("/metadata/as11-40-5874", MockResponse::json(StatusCode::OK, &location)),
        ])
        .await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/details/as11-40-5874").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"asset": manifest(), "metadata": location}));
        assert_eq!(
            images.requests(),
            vec!["/asset/as11-40-5874".to_string(), "/metadata/as11-40-5874".to_string()]
        );
    }

    #[tokio::test]
    async fn test_details_skips_metadata_when_asset_fails() {
        let images = MockUpstream::start(vec![(
            "/metadata/missing",
            MockResponse::json(StatusCode::OK, &json!({"location": "unused"})),
        )])
        .await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/details/missing").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to fetch asset details"}));
        assert_eq!(images.requests(), vec!["/asset/missing".to_string()]);
    }

    #[tokio::test]
    async fn test_details_tolerates_metadata_failure() {
        let images = MockUpstream::start(vec![(
            "/asset/as11-40-5874",
            MockResponse::json(StatusCode::OK, &manifest()),
        )])
        .await;
        let api = MockUpstream::closed().await;

        let response = get(test_state(&api, &images, None), "/api/nasaImages/details/as11-40-5874").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"asset": manifest(), "metadata": null}));
    }
}
