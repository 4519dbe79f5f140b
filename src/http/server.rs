//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the navigation handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve every GET path against the route table
//! - Answer with the rendered document or a one-hop redirect

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::history::{normalize_base, with_base};
use crate::app::render::render_document;
use crate::app::MountTarget;
use crate::config::{AppConfig, ConfigError, ValidationError};
use crate::http::request::{
    encode_path, navigation_path, request_id, RequestIdGenerator, X_REQUEST_ID,
};
use crate::http::response;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{Resolution, Router as RouteResolver};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RouteResolver>,
    pub base: Arc<str>,
    pub title: Arc<str>,
    pub mount: Arc<MountTarget>,
}

/// HTTP host serving the single-page application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Validate the configuration and build the server.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let resolver = config.build_router()?;
        Self::with_resolver(config, Arc::new(resolver))
    }

    /// Build the server around an already compiled route resolver.
    ///
    /// The resolver is used as is, without checking it against the
    /// configuration's route declarations.
    pub fn with_resolver(
        config: AppConfig,
        resolver: Arc<RouteResolver>,
    ) -> Result<Self, ConfigError> {
        let mount = MountTarget::parse(&config.app.mount).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidMountTarget(e.to_string())])
        })?;

        let state = AppState {
            router: resolver,
            base: normalize_base(&config.router.base).into(),
            title: config.app.title.as_str().into(),
            mount: Arc::new(mount),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(navigation_handler))
            .route("/{*path}", get(navigation_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "navigation",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id(req.headers()),
                    )
                }),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestIdGenerator))
    }

    /// The Axum router, for serving or driving in-process.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base = %self.config.router.base,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Resolve the requested path and answer with a page or a redirect.
async fn navigation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    // Matching runs on the decoded path; the raw form is only logged.
    let path = navigation_path(&state.base, &uri);

    let start = Instant::now();
    let result = state.router.resolve(&path);
    metrics::record_resolution(&result, start);

    match result {
        Ok(Resolution::Redirect(to)) => {
            let location = encode_path(&with_base(&state.base, &to)).into_owned();
            tracing::debug!(
                request_id = %request_id(&headers),
                raw_path = %uri.path(),
                path = %path,
                location = %location,
                "Redirecting"
            );
            response::redirect(&location)
        }
        // A direct render: navigate() takes no hops and yields the params.
        Ok(Resolution::Render(_)) => match state.router.navigate(&path) {
            Ok(navigation) => {
                tracing::debug!(
                    request_id = %request_id(&headers),
                    path = %path,
                    page = %navigation.page,
                    "Rendering page"
                );
                response::document(render_document(&state.mount, &state.title, &navigation))
            }
            Err(e) => routing_failure(&headers, &path, &e),
        },
        Err(e) => routing_failure(&headers, &path, &e),
    }
}

fn routing_failure(headers: &HeaderMap, path: &str, error: &crate::routing::RoutingError) -> Response {
    tracing::error!(
        request_id = %request_id(headers),
        path = %path,
        error = %error,
        "Route resolution failed"
    );
    response::routing_error(error)
}
