//! Remote renderer client.
//!
//! # Responsibilities
//! - POST the view data as JSON to the render target, forwarding the
//!   inbound query parameters
//! - Apply the configured connect and response timeouts (0 = none)
//! - Classify the body: a JSON object is structured data, other JSON is
//!   decoded, anything else is opaque text
//! - Absorb every transport failure into [`RenderResult::Empty`]
//!
//! Non-2xx statuses count as transport failures.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::RendererConfig;
use crate::observability::metrics;
use crate::relay::error::TransportError;

/// Outcome of one render call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RenderResult {
    /// The renderer could not be reached or the call failed.
    Empty,
    /// Non-JSON body verbatim, or the decoded text of a JSON string body.
    Text(String),
    /// Any other non-object JSON body (array, number, bool, null), decoded.
    Decoded(Value),
    /// JSON object body; each entry becomes a view binding.
    Structured(Map<String, Value>),
}

impl RenderResult {
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => Self::Structured(map),
            Ok(Value::String(text)) => Self::Text(text),
            Ok(value) => Self::Decoded(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::Decoded(_) => "decoded",
            Self::Structured(_) => "structured",
        }
    }
}

/// Transport used by the relay to reach the renderer.
pub trait RenderBackend: Send + Sync + 'static {
    fn render(
        &self,
        target: &str,
        query: &BTreeMap<String, String>,
        data: &Map<String, Value>,
    ) -> impl Future<Output = RenderResult> + Send;
}

/// HTTP transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
}

impl HttpRenderer {
    /// Build the client with the configured timeouts.
    pub fn new(config: &RendererConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if config.connect_timeout > 0 {
            builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout));
        }
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Perform the call, surfacing transport failures.
    pub async fn try_render(
        &self,
        target: &str,
        query: &BTreeMap<String, String>,
        data: &Map<String, Value>,
    ) -> Result<RenderResult, TransportError> {
        let url = target_url(target)?;

        let mut request = self.client.post(url).json(data);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(TransportError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.text().await.map_err(TransportError::Body)?;
        Ok(RenderResult::from_body(body))
    }
}

impl RenderBackend for HttpRenderer {
    async fn render(
        &self,
        target: &str,
        query: &BTreeMap<String, String>,
        data: &Map<String, Value>,
    ) -> RenderResult {
        let start_time = Instant::now();

        let result = match self.try_render(target, query, data).await {
            Ok(result) => {
                tracing::debug!(render_target = %target, outcome = result.outcome(), "Render call completed");
                result
            }
            Err(e) => {
                tracing::warn!(render_target = %target, error = %e, "Render call failed, continuing without content");
                RenderResult::Empty
            }
        };

        metrics::record_render(result.outcome(), start_time);
        result
    }
}

/// Targets without a scheme are issued over plain HTTP.
fn target_url(target: &str) -> Result<url::Url, TransportError> {
    let parsed = if target.contains("://") {
        url::Url::parse(target)
    } else {
        url::Url::parse(&format!("http://{target}"))
    };
    parsed.map_err(|source| TransportError::InvalidTarget {
        target: target.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_body() {
        assert_eq!(
            RenderResult::from_body("foo bar baz".into()),
            RenderResult::Text("foo bar baz".into())
        );
    }

    #[test]
    fn test_object_body_is_structured() {
        let result = RenderResult::from_body(r#"{"foo": {"bar": "baz"}}"#.into());
        let expected = json!({ "foo": { "bar": "baz" } });
        assert_eq!(result, RenderResult::Structured(expected.as_object().cloned().unwrap()));
    }

    #[test]
    fn test_invalid_json_is_text() {
        let body = r#"{ "foo":: bar }"#;
        assert_eq!(RenderResult::from_body(body.into()), RenderResult::Text(body.into()));
    }

    #[test]
    fn test_json_string_body_is_decoded_text() {
        assert_eq!(
            RenderResult::from_body(r#""<p>hi</p>""#.into()),
            RenderResult::Text("<p>hi</p>".into())
        );
    }

    #[test]
    fn test_non_object_json_is_decoded() {
        assert_eq!(RenderResult::from_body("null".into()), RenderResult::Decoded(Value::Null));
        assert_eq!(RenderResult::from_body("[1,2]".into()), RenderResult::Decoded(json!([1, 2])));
        assert_eq!(RenderResult::from_body("42".into()), RenderResult::Decoded(json!(42)));
    }

    #[test]
    fn test_serialized_shape() {
        assert_eq!(serde_json::to_value(RenderResult::Empty).unwrap(), json!({ "kind": "empty" }));
        assert_eq!(
            serde_json::to_value(RenderResult::Text("x".into())).unwrap(),
            json!({ "kind": "text", "value": "x" })
        );
    }

    #[test]
    fn test_target_url_scheme() {
        assert_eq!(
            target_url("localhost:3000/foo-bar").unwrap().as_str(),
            "http://localhost:3000/foo-bar"
        );
        assert_eq!(
            target_url("https://render.internal:443/").unwrap().as_str(),
            "https://render.internal/"
        );
        assert!(matches!(
            target_url("http://:99999"),
            Err(TransportError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_zero_timeouts_build() {
        assert!(HttpRenderer::new(&RendererConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_renderer_yields_empty() {
        // Reserve a port, then free it so the connection is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let renderer = HttpRenderer::new(&RendererConfig {
            host: "127.0.0.1".into(),
            port,
            connect_timeout: 500,
            timeout: 1000,
        })
        .unwrap();

        let target = format!("127.0.0.1:{port}/page");
        let result = renderer.render(&target, &BTreeMap::new(), &Map::new()).await;
        assert_eq!(result, RenderResult::Empty);
    }
}
