//! Server-side render relay.
//!
//! Intercepts view responses, sends their data to an external rendering
//! process over HTTP, and merges the rendered markup back into the view.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod view;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{relay_middleware, RelayError, RelayOptions, RenderRelay, RenderResult};
pub use view::ViewContext;
