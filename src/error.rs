use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of a single relayed upstream call
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Upstream answered with a non-success status
    #[error("upstream responded with {status}: {detail}")]
    Upstream { status: StatusCode, detail: JsonValue },
    /// The outbound call could not complete (DNS, connect, reset)
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Upstream claimed success but the body was not the JSON we expected
    #[error("malformed upstream response: {0}")]
    MalformedUpstreamResponse(#[from] serde_json::Error),
    /// The upstream URL template could not be turned into a full URL
    #[error("cannot resolve upstream URL: {0}")]
    Resolve(String),
}

impl RelayError {
    /// Wrap a reqwest error, dropping the URL so the credential never ends up in logs.
    pub fn transport(err: reqwest::Error) -> Self {
        RelayError::Transport(err.without_url())
    }

    /// Attach the human-readable name of what was being fetched.
    pub fn fetching(self, label: &'static str) -> ApiError {
        ApiError::Relay { label, source: self }
    }
}

/// Boundary error for every relay endpoint
///
/// Relay failures of any kind collapse to HTTP 500 with a generic
/// `{"error": "Failed to fetch <label>"}` body. The upstream status and
/// detail stay in the server log.
#[derive(Debug)]
pub enum ApiError {
    /// Any failure while relaying to the upstream
    Relay { label: &'static str, source: RelayError },
    /// Inbound path matched a route but not its file naming
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Relay { label, source } => {
                tracing::debug!("Relay failure reported to client as generic error: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch {}", label),
                )
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                format!("Not found: {}", what),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
