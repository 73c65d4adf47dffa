use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Response type for the hello probe
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HelloResponse {
    pub message: String,
}

/// Asset manifest and metadata of one image-library item
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AssetDetailsResponse {
    pub asset: JsonValue,
    /// `null` when the metadata lookup failed after the manifest succeeded
    pub metadata: Option<JsonValue>,
}
