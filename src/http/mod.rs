//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, shell handler)
//!     → request.rs (request ID, inbound snapshot for the relay)
//!     → [relay middleware renders through the external renderer]
//!     → response.rs (replace body and content type)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{InboundRequest, RelayRequestId, X_REQUEST_ID};
pub use server::HttpServer;
