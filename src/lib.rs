//! Security posture dashboard library.
//!
//! Polls a task/health API, evaluates four security checks against its
//! `/security/info` report and renders the results.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod posture;

pub use api::{ApiClient, Envelope, Fetch};
pub use config::DashboardConfig;
pub use http::DashboardServer;
pub use lifecycle::Shutdown;
pub use posture::{evaluate, CheckId, CheckResult, PostureReport};
