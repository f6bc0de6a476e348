//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! capture middleware / persister produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, human or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every per-request failure surfaces here and nowhere else
//! - Request ID is attached to persistence events
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
