//! Security posture subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health ─────────┐
//!                      ├─→ evaluator.rs (pure) ─→ PostureReport
//! GET /security/info ──┘        │
//!                        info.rs (typed payload view)
//! ```
//!
//! # Design Decisions
//! - The two fetches are independent and run concurrently
//! - Evaluation is stateless and idempotent
//! - Fail-safe to FAIL: an unreachable or malformed endpoint is a failed check

pub mod check;
pub mod evaluator;
pub mod info;

pub use check::{CheckId, CheckResult, PostureReport, RawDiagnostic};
pub use evaluator::{evaluate, NO_DATA};
pub use info::SecurityInfo;

use crate::api::{Fetch, HEALTH_PATH, SECURITY_INFO_PATH};
use crate::observability::metrics;

/// Fetch both inputs and evaluate them.
pub async fn collect<F: Fetch>(fetcher: &F) -> PostureReport {
    let (health, info) = tokio::join!(
        fetcher.get_json(HEALTH_PATH),
        fetcher.get_json(SECURITY_INFO_PATH)
    );

    let report = evaluate(&health, &info);

    for check in &report.checks {
        metrics::record_check(check.id, check.pass);
    }
    tracing::info!(
        health = report.get(CheckId::Health).pass,
        nonroot = report.get(CheckId::NonRoot).pass,
        rofs = report.get(CheckId::ReadOnlyFs).pass,
        nnp = report.get(CheckId::NoNewPrivs).pass,
        "Security posture evaluated"
    );

    report
}
