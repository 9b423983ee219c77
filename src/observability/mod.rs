//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay + host server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Metric calls are no-ops until a recorder is installed, so the library
//!   can be embedded without the exporter

pub mod logging;
pub mod metrics;
