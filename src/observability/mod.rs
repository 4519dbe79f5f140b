//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router / app / HTTP host produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (navigation counters, resolution latency)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (path, rule, page) on every resolution event
//! - Request ID flows through the HTTP host's spans
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
