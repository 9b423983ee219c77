//! Response transformation.
//!
//! The relay never builds a fresh response: it swaps the body and content
//! type of the one returned downstream, keeping status, remaining headers and
//! extensions intact.

use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::Response;

/// Move the body and `Content-Type` of `content` into `response`.
pub fn replace_content(response: &mut Response, content: Response) {
    let (parts, body) = content.into_parts();

    response.headers_mut().remove(CONTENT_LENGTH);
    match parts.headers.get(CONTENT_TYPE) {
        Some(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value.clone());
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    *response.body_mut() = body;
}
