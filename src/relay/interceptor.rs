//! Request interception.
//!
//! Runs the downstream handler, recovers the view it produced, and either
//! answers AJAX requests with the raw view data or renders the page through
//! the external renderer.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::RendererConfig;
use crate::http::request::InboundRequest;
use crate::observability::metrics;
use crate::relay::client::{HttpRenderer, RenderBackend};
use crate::relay::error::RelayError;
use crate::relay::merge::{merge_into, respond_as_json};
use crate::relay::target::build_target;
use crate::view::ViewContext;

/// Per-route middleware parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOptions {
    /// View data key that receives text render results.
    pub content_key: String,

    /// `Some(false)` renders AJAX requests as full pages.
    pub json_mode: Option<bool>,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self::new("content")
    }
}

impl RelayOptions {
    pub fn new(content_key: impl Into<String>) -> Self {
        Self {
            content_key: content_key.into(),
            json_mode: None,
        }
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = Some(enabled);
        self
    }

    fn responds_with_json(&self, inbound: &InboundRequest) -> bool {
        self.json_mode != Some(false) && inbound.is_ajax
    }
}

/// The render relay: configuration, transport and route options.
///
/// Cheap to clone; the configuration and transport are shared read-only.
pub struct RenderRelay<B = HttpRenderer> {
    renderer: Arc<RendererConfig>,
    backend: Arc<B>,
    options: RelayOptions,
}

impl<B> Clone for RenderRelay<B> {
    fn clone(&self) -> Self {
        Self {
            renderer: self.renderer.clone(),
            backend: self.backend.clone(),
            options: self.options.clone(),
        }
    }
}

impl RenderRelay<HttpRenderer> {
    /// Relay over HTTP using the timeouts in `config`.
    pub fn from_config(config: RendererConfig) -> Result<Self, reqwest::Error> {
        let backend = HttpRenderer::new(&config)?;
        Ok(Self::new(config, backend))
    }
}

impl<B: RenderBackend> RenderRelay<B> {
    pub fn new(renderer: RendererConfig, backend: B) -> Self {
        Self {
            renderer: Arc::new(renderer),
            backend: Arc::new(backend),
            options: RelayOptions::default(),
        }
    }

    /// Same relay with different route options.
    pub fn with_options(&self, options: RelayOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Handle one request.
    ///
    /// `next` runs the rest of the pipeline; its response must carry a
    /// [`ViewContext`] in its extensions. That same response is mutated and
    /// returned.
    pub async fn handle<F, Fut>(&self, request: Request, next: F) -> Result<Response, RelayError>
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        let inbound = InboundRequest::capture(&request);
        let mut response = next(request).await;

        let view = response
            .extensions_mut()
            .remove::<ViewContext>()
            .ok_or_else(|| RelayError::InvalidArgument("expected a view context".to_string()))?;

        if self.options.responds_with_json(&inbound) {
            tracing::debug!(path = %inbound.path, mode = "json", "Responding with view data");
            metrics::record_relay_mode("json");
            return Ok(respond_as_json(response, view));
        }

        let target = build_target(&self.renderer, &inbound.path);
        tracing::debug!(path = %inbound.path, mode = "merge", render_target = %target, "Rendering view remotely");
        metrics::record_relay_mode("merge");

        let result = self
            .backend
            .render(&target, &inbound.query, &view.data)
            .await;

        Ok(merge_into(response, view, result, &self.options.content_key))
    }
}

/// Axum middleware adapter.
///
/// ```ignore
/// let relay = RenderRelay::from_config(config.renderer.clone())?;
/// let app = Router::new()
///     .route("/", get(page))
///     .layer(axum::middleware::from_fn_with_state(relay, relay_middleware::<HttpRenderer>));
/// ```
pub async fn relay_middleware<B: RenderBackend>(
    State(relay): State<RenderRelay<B>>,
    request: Request,
    next: Next,
) -> Result<Response, RelayError> {
    relay.handle(request, |request| next.run(request)).await
}
