//! In-process stand-ins for the upstream hosts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

use crate::config::Config;
use crate::forwarder::Forwarder;
use crate::routes;
use crate::state::AppState;

/// Canned reply for one upstream path
#[derive(Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
}

impl MockResponse {
    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: Bytes::from(serde_json::to_vec(value).unwrap()),
        }
    }

    pub fn bytes(status: StatusCode, content_type: Option<&'static str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    fn into_reply(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

/// Upstream server bound to an ephemeral local port
///
/// Requests are matched on path only; unknown paths get a 404. Every
/// request's path and query is recorded in arrival order.
pub struct MockUpstream {
    pub base_url: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub async fn start(routes: Vec<(&'static str, MockResponse)>) -> Self {
        let routes: Arc<HashMap<&'static str, MockResponse>> = Arc::new(routes.into_iter().collect());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let app = Router::new().fallback(move |uri: Uri| {
            let routes = routes.clone();
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(uri.to_string());
                match routes.get(uri.path()) {
                    Some(reply) => reply.clone().into_reply(),
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{}", addr)).unwrap(),
            requests,
        }
    }

    /// An address with nothing listening, for connection failures
    pub async fn closed() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        Self {
            base_url: Url::parse(&format!("http://{}", addr)).unwrap(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Path and query of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn test_config(api: &MockUpstream, images: &MockUpstream, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        api_base_url: api.base_url.clone(),
        images_base_url: images.base_url.clone(),
        service_port: 5000,
        service_host: "0.0.0.0".to_string(),
    }
}

pub fn test_state(api: &MockUpstream, images: &MockUpstream, api_key: Option<&str>) -> AppState {
    let forwarder = Forwarder::new().expect("Failed to create upstream client");
    AppState::new(&test_config(api, images, api_key), forwarder)
}

/// Collect a relay response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Send one GET through the full relay router
pub async fn get(state: AppState, uri: &str) -> Response {
    routes::router(state)
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}
