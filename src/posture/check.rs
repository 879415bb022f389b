//! Check identifiers, results and the assembled report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Envelope;

/// The four named posture checks, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckId {
    /// API answers `/health` with HTTP 200.
    #[serde(rename = "sec-health")]
    Health,
    /// Service process does not run as uid 0.
    #[serde(rename = "sec-nonroot")]
    NonRoot,
    /// Service root filesystem is mounted read-only.
    #[serde(rename = "sec-rofs")]
    ReadOnlyFs,
    /// Service process has the no-new-privileges flag set.
    #[serde(rename = "sec-nnp")]
    NoNewPrivs,
}

impl CheckId {
    pub const ALL: [CheckId; 4] = [
        CheckId::Health,
        CheckId::NonRoot,
        CheckId::ReadOnlyFs,
        CheckId::NoNewPrivs,
    ];

    /// Stable identifier, also used as the HTML element id.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::Health => "sec-health",
            CheckId::NonRoot => "sec-nonroot",
            CheckId::ReadOnlyFs => "sec-rofs",
            CheckId::NoNewPrivs => "sec-nnp",
        }
    }

    /// Human readable description.
    pub fn label(self) -> &'static str {
        match self {
            CheckId::Health => "API healthy (HTTP 200)",
            CheckId::NonRoot => "Runs as non-root user",
            CheckId::ReadOnlyFs => "Read-only root filesystem",
            CheckId::NoNewPrivs => "NoNewPrivs enabled",
        }
    }

    fn index(self) -> usize {
        match self {
            CheckId::Health => 0,
            CheckId::NonRoot => 1,
            CheckId::ReadOnlyFs => 2,
            CheckId::NoNewPrivs => 3,
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: CheckId,
    pub pass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn new(id: CheckId, pass: bool, detail: Option<String>) -> Self {
        Self { id, pass, detail }
    }

    /// `PASS`, `FAIL` or `FAIL: <detail>`.
    ///
    /// Detail is only shown for failures.
    pub fn badge(&self) -> String {
        match (&self.detail, self.pass) {
            (_, true) => "PASS".to_string(),
            (Some(detail), false) if !detail.is_empty() => format!("FAIL: {detail}"),
            (_, false) => "FAIL".to_string(),
        }
    }

    /// CSS class for the dashboard list item.
    pub fn css_class(&self) -> &'static str {
        if self.pass {
            "ok"
        } else {
            "bad"
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {}", self.id.as_str(), self.badge())
    }
}

/// Both source responses, verbatim, for display next to the checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDiagnostic {
    pub health: Envelope,
    pub info: Envelope,
}

/// Result of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureReport {
    /// Always exactly one result per [`CheckId`], in [`CheckId::ALL`] order.
    pub checks: [CheckResult; 4],
    pub raw: RawDiagnostic,
}

impl PostureReport {
    pub fn get(&self, id: CheckId) -> &CheckResult {
        &self.checks[id.index()]
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.pass)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.pass)
    }
}
