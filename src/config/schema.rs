//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::relay::RelayOptions;

/// Root configuration for the relay host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Location of the external renderer and its timeouts.
    pub renderer: RendererConfig,

    /// Default middleware parameters.
    pub relay: RelaySettings,

    /// Application shell served by the host server.
    pub shell: ShellConfig,

    /// Inbound request timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// External renderer location.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RendererConfig {
    /// Renderer host, optionally with a scheme (e.g., "http://localhost").
    pub host: String,

    /// Renderer port.
    pub port: u16,

    /// Connection timeout in milliseconds. 0 waits indefinitely.
    pub connect_timeout: u64,

    /// Response timeout in milliseconds. 0 waits indefinitely.
    pub timeout: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
            connect_timeout: 0,
            timeout: 0,
        }
    }
}

/// Default middleware parameters applied by the host server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelaySettings {
    /// View data key receiving the rendered markup.
    pub content_key: String,

    /// Whether AJAX requests get the raw view data as JSON.
    pub ajax_json: bool,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            content_key: "content".to_string(),
            ajax_json: true,
        }
    }
}

impl RelaySettings {
    /// Middleware options equivalent to these settings.
    pub fn options(&self) -> RelayOptions {
        let options = RelayOptions::new(self.content_key.clone());
        if self.ajax_json {
            options
        } else {
            options.with_json_mode(false)
        }
    }
}

/// Application shell document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Value bound to `title` in the shell view.
    pub title: String,

    /// Path to a template file. Empty uses the built-in shell.
    pub template_path: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "App".to_string(),
            template_path: String::new(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request deadline in seconds. 0 disables it.
    pub request_secs: u64,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
