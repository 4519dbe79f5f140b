//! Response construction.
//!
//! # Design Decisions
//! - Redirects use 302 Found so the browser re-requests the target
//! - Routing errors are configuration defects and map to 500

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::routing::RoutingError;

pub fn document(html: String) -> Response {
    Html(html).into_response()
}

pub fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect target is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}

pub fn routing_error(error: &RoutingError) -> Response {
    let message = match error {
        RoutingError::NoRouteMatched { .. } => "No route matched",
        RoutingError::RedirectLoop { .. } => "Redirect loop",
        RoutingError::InvalidPattern { .. } => "Invalid route table",
    };
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
