//! Normalized outcome of a single API call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{ok, status, data}` wrapper for any HTTP call outcome.
///
/// `status` is `0` when no response was received at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Transport succeeded and the status was 2xx.
    pub ok: bool,
    /// HTTP status code.
    pub status: u16,
    /// Parsed body, or an empty object when the body was not JSON.
    #[serde(default = "empty_object")]
    pub data: Value,
    /// Transport error text, only present when no response arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Build an envelope from a received response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let data = serde_json::from_slice(body).unwrap_or_else(|_| empty_object());
        Self {
            ok: (200..300).contains(&status),
            status,
            data,
            error: None,
        }
    }

    /// Build an envelope for a request that never got a response.
    pub fn unreachable(error: impl std::fmt::Display) -> Self {
        Self {
            ok: false,
            status: 0,
            data: empty_object(),
            error: Some(error.to_string()),
        }
    }

    /// True when a response with exactly this status was received.
    pub fn has_status(&self, status: u16) -> bool {
        self.ok && self.status == status
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
