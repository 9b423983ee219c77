//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router serving the application shell view
//! - Wrap it with the render relay middleware
//! - Wire up request ID, tracing and the optional request timeout
//! - Serve until the shutdown signal fires

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::Uri;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{RelayConfig, ShellConfig};
use crate::http::request::{parse_query, RelayRequestId};
use crate::lifecycle::shutdown;
use crate::relay::{relay_middleware, HttpRenderer, RenderRelay};
use crate::view::ViewContext;

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to read shell template '{path}': {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build renderer client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Shell document served for every page.
#[derive(Clone)]
struct ShellState {
    template: Arc<str>,
    title: Arc<str>,
}

/// HTTP host for the render relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let relay = RenderRelay::from_config(config.renderer.clone())?
            .with_options(config.relay.options());
        let shell = ShellState {
            template: load_template(&config.shell, &config.relay.content_key)?.into(),
            title: config.shell.title.as_str().into(),
        };

        let router = Self::build_router(&config, shell, relay);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, shell: ShellState, relay: RenderRelay) -> Router {
        let mut router = Router::new()
            .route("/", get(shell_handler))
            .route("/{*path}", get(shell_handler))
            .with_state(shell)
            .layer(middleware::from_fn_with_state(
                relay,
                relay_middleware::<HttpRenderer>,
            ));

        if config.timeouts.request_secs > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(RelayRequestId))
    }

    /// Run the server until `shutdown_rx` fires, draining in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            renderer_host = %self.config.renderer.host,
            renderer_port = self.config.renderer.port,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

async fn shell_handler(State(shell): State<ShellState>, uri: Uri) -> ViewContext {
    let query: Map<String, Value> = parse_query(uri.query())
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    ViewContext::new(shell.template.as_ref())
        .with("title", shell.title.as_ref())
        .with("path", uri.path())
        .with("query", query)
}

fn load_template(shell: &ShellConfig, content_key: &str) -> Result<String, ServerError> {
    if shell.template_path.is_empty() {
        return Ok(default_template(content_key));
    }
    fs::read_to_string(&shell.template_path).map_err(|source| ServerError::Template {
        path: shell.template_path.clone(),
        source,
    })
}

fn default_template(content_key: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{{{{ title }}}}</title></head>\n\
         <body><div id=\"app\">{{!! {content_key} !!}}</div></body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_uses_content_key() {
        let template = default_template("markup");
        assert!(template.contains("<title>{{ title }}</title>"));
        assert!(template.contains("<div id=\"app\">{!! markup !!}</div>"));
    }

    #[test]
    fn test_missing_template_file() {
        let shell = ShellConfig {
            title: "App".into(),
            template_path: "/nonexistent/shell.html".into(),
        };
        let err = load_template(&shell, "content").unwrap_err();
        assert!(matches!(err, ServerError::Template { .. }));
    }

    #[tokio::test]
    async fn test_shell_handler_binds_request() {
        let shell = ShellState {
            template: "{{ title }}".into(),
            title: "Docs".into(),
        };
        let uri: Uri = "/guide/intro?lang=en".parse().unwrap();

        let view = shell_handler(State(shell), uri).await;

        assert_eq!(view.data["title"], "Docs");
        assert_eq!(view.data["path"], "/guide/intro");
        assert_eq!(view.data["query"]["lang"], "en");
    }
}
