//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → RelayConfig (immutable)
//!     → shared via Arc with the relay and the host server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal (even empty) configs
//! - Values are passed through to the transport without semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RelayConfig;
pub use schema::RelaySettings;
pub use schema::RendererConfig;
pub use schema::ShellConfig;
pub use schema::TimeoutConfig;
