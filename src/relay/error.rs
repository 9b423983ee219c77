//! Relay error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the relay to the framework.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The downstream response did not carry a view context.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Render relay failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Failures while contacting the renderer. Never leaves the client: every
/// variant is absorbed into an empty render result.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid render target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("renderer responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
