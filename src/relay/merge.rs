//! Folding render results back into the original response.

use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::http::response::replace_content;
use crate::relay::client::RenderResult;
use crate::view::ViewContext;

/// Merge `result` into the view and re-render it into `response`.
///
/// Structured results bind each entry as a top-level key, overwriting existing
/// bindings. Text and other decoded JSON bind under `content_key`; an empty
/// result binds an empty string there.
pub fn merge_into(
    mut response: Response,
    mut view: ViewContext,
    result: RenderResult,
    content_key: &str,
) -> Response {
    match result {
        RenderResult::Structured(entries) => {
            for (key, value) in entries {
                view.set(key, value);
            }
        }
        RenderResult::Text(markup) => view.set(content_key, markup),
        RenderResult::Decoded(value) => view.set(content_key, value),
        RenderResult::Empty => view.set(content_key, String::new()),
    }

    replace_content(&mut response, Html(view.render()).into_response());
    response.extensions_mut().insert(view);
    response
}

/// Replace the body with the view's data as a JSON document.
pub fn respond_as_json(mut response: Response, view: ViewContext) -> Response {
    replace_content(&mut response, Json(&view.data).into_response());
    response.extensions_mut().insert(view);
    response
}
