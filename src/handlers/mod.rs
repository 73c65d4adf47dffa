pub mod health;
pub mod apod;
pub mod mars;
pub mod epic;
pub mod asteroids;
pub mod images;

pub use health::hello_handler;
pub use apod::apod_handler;
pub use mars::{mars_photos_handler, rover_manifest_handler};
pub use epic::{epic_archive_handler, epic_available_handler, epic_by_date_handler, epic_images_handler};
pub use asteroids::{asteroid_browse_handler, asteroid_feed_handler, asteroid_lookup_handler};
pub use images::{
    asset_details_handler, image_asset_handler, image_captions_handler, image_metadata_handler,
    image_search_handler,
};

use std::collections::HashMap;

use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::route_table::{ResponseMode, RouteId};
use crate::state::AppState;

/// Path placeholders and query parameters of an inbound request, by name
#[derive(Debug, Default)]
pub struct Inbound {
    pub path: HashMap<String, String>,
    pub query: HashMap<String, String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Inbound {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(path)) => path,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(rejection) => return Err(rejection.into_response()),
        };
        let Query(query) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Self { path, query })
    }
}

/// Resolve `route` and relay the upstream answer in the route's response mode
pub(crate) async fn relay(state: &AppState, route: RouteId, inbound: &Inbound) -> Result<Response, ApiError> {
    let descriptor = state.routes.descriptor(route);

    let url = state.routes.resolve(route, &inbound.path, &inbound.query).map_err(|e| {
        tracing::error!("Cannot build upstream URL for {}: {}", descriptor.inbound_path, e);
        e.fetching(descriptor.label)
    })?;

    match descriptor.mode {
        ResponseMode::JsonRelay => {
            let data = state
                .forwarder
                .fetch_json(url)
                .await
                .map_err(|e| e.fetching(descriptor.label))?;
            Ok(Json(data).into_response())
        }
        ResponseMode::StreamRelay => state
            .forwarder
            .fetch_stream(url)
            .await
            .map_err(|e| e.fetching(descriptor.label)),
    }
}
