//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Take the read-only snapshot of the request the relay needs: path,
//!   decoded query and the AJAX flag

use std::collections::BTreeMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const X_REQUESTED_WITH: &str = "x-requested-with";

/// Produces `x-request-id` values for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayRequestId;

impl MakeRequestId for RelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Snapshot of an inbound request taken before the downstream handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// Path without surrounding slashes; `"/"` for the root.
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub is_ajax: bool,
}

impl InboundRequest {
    pub fn capture<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        Self {
            path: normalize_path(uri.path()),
            query: parse_query(uri.query()),
            is_ajax: is_ajax(request.headers()),
        }
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decode a query string; a repeated key keeps its last value.
pub fn parse_query(query: Option<&str>) -> BTreeMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// `X-Requested-With: XMLHttpRequest`, compared case-insensitively.
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(X_REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_capture_path_and_query() {
        let inbound = InboundRequest::capture(&request("/foo-bar?page=2&q=a%20b"));
        assert_eq!(inbound.path, "foo-bar");
        assert_eq!(inbound.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(inbound.query.get("q").map(String::as_str), Some("a b"));
        assert!(!inbound.is_ajax);
    }

    #[test]
    fn test_root_path() {
        assert_eq!(InboundRequest::capture(&request("/")).path, "/");
        assert_eq!(InboundRequest::capture(&request("/a/b/")).path, "a/b");
    }

    #[test]
    fn test_repeated_query_key_keeps_last() {
        let query = parse_query(Some("a=1&a=2"));
        assert_eq!(query.get("a").map(String::as_str), Some("2"));
        assert!(parse_query(None).is_empty());
    }

    #[test]
    fn test_ajax_detection() {
        let mut req = request("/");
        req.headers_mut()
            .insert(X_REQUESTED_WITH, HeaderValue::from_static("xmlhttprequest"));
        assert!(InboundRequest::capture(&req).is_ajax);

        req.headers_mut()
            .insert(X_REQUESTED_WITH, HeaderValue::from_static("fetch"));
        assert!(!InboundRequest::capture(&req).is_ajax);
    }

    #[test]
    fn test_request_id_is_uuid() {
        let id = RelayRequestId.make_request_id(&request("/")).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
