//! Remote API access subsystem.
//!
//! # Data Flow
//! ```text
//! ApiConfig (base URL, timeout)
//!     → client.rs (reqwest GET against base URL + endpoint path)
//!     → envelope.rs (normalize transport/status/body into Envelope)
//!     → posture evaluator, dashboard panes, CLI output
//! ```
//!
//! # Design Decisions
//! - Nothing past the fetch boundary ever sees an error: every outcome is an Envelope
//! - Non-JSON bodies become an empty object, never a parse error
//! - Every request carries a deadline so a hung API cannot stall a cycle

pub mod client;
pub mod envelope;

pub use client::{ApiClient, ClientError, Fetch};
pub use envelope::Envelope;

/// Liveness endpoint of the remote service.
pub const HEALTH_PATH: &str = "/health";

/// Process security facts of the remote service.
pub const SECURITY_INFO_PATH: &str = "/security/info";

/// Task list of the remote service.
pub const TASKS_PATH: &str = "/tasks";
