//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! API client, evaluator, dashboard:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (check gauges, fetch counters/histograms)
//!
//! Consumers:
//!     → stderr log stream
//!     → Prometheus scrape (optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
