//! Shared helpers for integration tests.

use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;

use spa_router::config::AppConfig;
use spa_router::http::HttpServer;

/// Axum router for the given configuration.
pub fn app(config: AppConfig) -> axum::Router {
    HttpServer::new(config)
        .expect("valid configuration")
        .into_router()
}

/// Send a GET for `uri` through `router` in-process.
pub async fn get(router: axum::Router, uri: &str) -> Response<Body> {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as UTF-8 text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
