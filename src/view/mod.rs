//! View contexts produced by downstream handlers.
//!
//! A handler that returns a [`ViewContext`] gets a rendered HTML response
//! with the view itself attached to the response extensions. The relay looks
//! for that attachment to recover the original view, mutate its data, and
//! render it again.

pub mod template;

use axum::response::{Html, IntoResponse, Response};
use serde_json::{Map, Value};

/// Template identity plus the data it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    template: String,
    /// Key/value bindings available to the template.
    pub data: Map<String, Value>,
}

impl ViewContext {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            data: Map::new(),
        }
    }

    /// Bind `key` to `value`, replacing any previous binding.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Render the template against the current data.
    pub fn render(&self) -> String {
        template::render(&self.template, &self.data)
    }
}

impl IntoResponse for ViewContext {
    fn into_response(self) -> Response {
        let mut response = Html(self.render()).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
