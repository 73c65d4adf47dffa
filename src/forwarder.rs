use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value as JsonValue;
use url::Url;

use crate::error::RelayError;
use crate::route_table::redact;

/// Shareable upstream HTTP client for use across async handlers
///
/// Each call is a single GET with no retries and no timeout beyond the
/// transport defaults. Outbound URLs are only ever logged through
/// [`redact`].
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self { client })
    }

    /// GET `url` and return its JSON body unchanged
    pub async fn fetch_json(&self, url: Url) -> Result<JsonValue, RelayError> {
        let target = redact(&url);
        tracing::info!("Forwarding JSON request to: {}", target);

        let result = self.try_fetch_json(url).await;
        if let Err(e) = &result {
            tracing::error!("Error fetching from {}: {}", target, e);
        }
        result
    }

    async fn try_fetch_json(&self, url: Url) -> Result<JsonValue, RelayError> {
        let response = self.client.get(url).send().await.map_err(RelayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_error_detail(response).await;
            return Err(RelayError::Upstream { status, detail });
        }

        let body = response.bytes().await.map_err(RelayError::transport)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `url` and stream its body back with the upstream content type
    ///
    /// The body is piped through chunk by chunk; a non-success status fails
    /// without reading the body.
    pub async fn fetch_stream(&self, url: Url) -> Result<Response, RelayError> {
        let target = redact(&url);
        tracing::info!("Streaming request to: {}", target);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = RelayError::transport(e);
                tracing::error!("Error proxying {}: {}", target, err);
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let err = RelayError::Upstream { status, detail: JsonValue::Null };
            tracing::error!("Error proxying {}: {}", target, err);
            return Err(err);
        }

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let mut relayed = (StatusCode::OK, Body::from_stream(response.bytes_stream())).into_response();
        if let Some(content_type) = content_type {
            relayed.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }

        Ok(relayed)
    }
}

/// Best-effort decode of an upstream error body
///
/// JSON bodies are kept as parsed; anything else is kept as a string, and an
/// empty or unreadable body becomes `{}`.
async fn read_error_detail(response: reqwest::Response) -> JsonValue {
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => {
            serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
        }
        _ => JsonValue::Object(Default::default()),
    }
}
