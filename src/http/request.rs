//! Request identification and navigation extraction.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An incoming `x-request-id` is kept, otherwise a UUID v4 is generated

use std::borrow::Cow;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::app::history::strip_base;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID set by the middleware, or "unknown".
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Characters escaped when a path is written back into a URL.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Navigation request for `uri`, relative to `base`, query included.
///
/// The path is percent-decoded before matching. A decoded `?` or `#`
/// stays escaped so it is not mistaken for a query or fragment.
pub fn navigation_path(base: &str, uri: &Uri) -> String {
    let decoded = decode_path(uri.path());
    let path = strip_base(base, &decoded);
    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

/// Percent-decode a URL path. Invalid UTF-8 is replaced, not rejected.
pub fn decode_path(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    if decoded.contains(['?', '#']) {
        decoded.replace('?', "%3F").replace('#', "%23")
    } else {
        decoded.into_owned()
    }
}

/// Percent-encode a decoded path for use in a `Location` header.
pub fn encode_path(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, PATH_ESCAPE).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_path() {
        let uri: Uri = "/tasks/todo?filter=open".parse().unwrap();
        assert_eq!(navigation_path("/tasks", &uri), "/todo?filter=open");
        assert_eq!(navigation_path("/", &uri), "/tasks/todo?filter=open");

        let uri: Uri = "/tasks".parse().unwrap();
        assert_eq!(navigation_path("/tasks", &uri), "/");
    }

    #[test]
    fn test_navigation_path_is_decoded() {
        let uri: Uri = "/caf%C3%A9?q=%C3%A9".parse().unwrap();
        assert_eq!(navigation_path("/", &uri), "/café?q=%C3%A9");

        let uri: Uri = "/t%C3%A2ches/caf%C3%A9".parse().unwrap();
        assert_eq!(navigation_path("/tâches", &uri), "/café");

        // Escaped delimiters stay part of the path.
        let uri: Uri = "/a%3Fb%23c".parse().unwrap();
        assert_eq!(navigation_path("/", &uri), "/a%3Fb%23c");

        assert_eq!(decode_path("/%FF"), "/\u{FFFD}");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/todo"), "/todo");
        assert_eq!(encode_path("/café list"), "/caf%C3%A9%20list");
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let request = Request::builder().body(()).unwrap();
        let id = RequestIdGenerator.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(text).is_ok());
    }

    #[test]
    fn test_request_id_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(request_id(&headers), "abc");
    }
}
