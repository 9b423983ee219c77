//! Server-side render relay.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → interceptor.rs (snapshot request, run downstream, recover the view)
//!     → AJAX? ── yes ──→ merge.rs respond_as_json (no outbound call)
//!        │
//!        no
//!        → target.rs (host:port/path)
//!        → client.rs (POST view data to the renderer, failures → Empty)
//!        → merge.rs merge_into (fold result into the view, re-render)
//!     → same Response object, mutated
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per full-page request, no retries
//! - Renderer failures degrade the page instead of failing the request
//! - A response without a view is an integration error and fails loudly

pub mod client;
pub mod error;
pub mod interceptor;
pub mod merge;
pub mod target;

pub use client::{HttpRenderer, RenderBackend, RenderResult};
pub use error::{RelayError, TransportError};
pub use interceptor::{relay_middleware, RelayOptions, RenderRelay};
pub use target::build_target;
