//! Security posture evaluation.
//!
//! Pure function of the two fetched envelopes. It cannot fail: a missing or
//! malformed field fails its check instead of raising an error.

use crate::api::Envelope;
use crate::posture::check::{CheckId, CheckResult, PostureReport, RawDiagnostic};
use crate::posture::info::{display_value, SecurityInfo};

/// Detail attached to every info-dependent check when the info fetch failed.
pub const NO_DATA: &str = "no data";

/// Evaluate the four posture checks.
pub fn evaluate(health: &Envelope, info: &Envelope) -> PostureReport {
    let health_check = CheckResult::new(CheckId::Health, health.has_status(200), None);

    let [nonroot, rofs, nnp] = if info.ok {
        evaluate_info(&SecurityInfo::from_payload(&info.data))
    } else {
        [CheckId::NonRoot, CheckId::ReadOnlyFs, CheckId::NoNewPrivs]
            .map(|id| CheckResult::new(id, false, Some(NO_DATA.to_string())))
    };

    PostureReport {
        checks: [health_check, nonroot, rofs, nnp],
        raw: RawDiagnostic {
            health: health.clone(),
            info: info.clone(),
        },
    }
}

fn evaluate_info(info: &SecurityInfo) -> [CheckResult; 3] {
    let nonroot = CheckResult::new(
        CheckId::NonRoot,
        !info.is_root(),
        Some(format!("uid={}", display_value(info.uid.as_ref()))),
    );

    let rofs = CheckResult::new(CheckId::ReadOnlyFs, info.readonly, None);

    let nnp_value = info.no_new_privs();
    let nnp = CheckResult::new(
        CheckId::NoNewPrivs,
        nnp_value.and_then(|v| v.as_str()) == Some("1"),
        Some(format!("NoNewPrivs={}", display_value(nnp_value))),
    );

    [nonroot, rofs, nnp]
}
