//! Typed view over the `/security/info` payload.
//!
//! Every field is optional on the wire. Absence has a fixed meaning here:
//! uid kept as reported (possibly missing), not read-only, no capability map.

use serde_json::{Map, Number, Value};

/// Capability key that must hold the string `"1"`.
pub const NO_NEW_PRIVS: &str = "NoNewPrivs";

/// Effective capability mask, informational only.
pub const CAP_EFF: &str = "CapEff";

/// Rendering used for a value that is not present at all.
pub const UNDEFINED: &str = "undefined";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityInfo {
    /// Effective uid exactly as reported, `None` when absent.
    pub uid: Option<Value>,
    /// Truthiness of the `readonly` field, `false` when absent.
    pub readonly: bool,
    /// Capability map, `None` when absent or not an object.
    pub caps: Option<Map<String, Value>>,
    /// `env.HOSTNAME` when reported and non-empty.
    pub hostname: Option<String>,
}

impl SecurityInfo {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            uid: payload.get("uid").cloned(),
            readonly: payload.get("readonly").is_some_and(is_truthy),
            caps: payload.get("caps").and_then(Value::as_object).cloned(),
            hostname: payload
                .pointer("/env/HOSTNAME")
                .and_then(Value::as_str)
                .filter(|h| !h.is_empty())
                .map(str::to_owned),
        }
    }

    /// True only when the uid is the number zero. Missing, null and string
    /// uids are not root.
    pub fn is_root(&self) -> bool {
        self.uid.as_ref().and_then(Value::as_f64) == Some(0.0)
    }

    /// Raw `caps.NoNewPrivs` entry, if both the map and the key exist.
    pub fn no_new_privs(&self) -> Option<&Value> {
        self.caps.as_ref()?.get(NO_NEW_PRIVS)
    }

    /// `caps.CapEff` as reported (hex string), if present.
    pub fn effective_caps(&self) -> Option<&str> {
        self.caps.as_ref()?.get(CAP_EFF)?.as_str()
    }
}

/// Loose truthiness: false, null, 0, NaN and "" are false, anything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render an optional JSON value for a `key=value` detail string.
///
/// Strings are shown without quotes, missing values as `undefined`, and
/// integral floats without a fractional part (`1000.0` renders as `1000`).
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => display_number(n),
        Some(other) => other.to_string(),
    }
}

fn display_number(n: &Number) -> String {
    if n.is_f64() {
        match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) => f.to_string(),
            None => n.to_string(),
        }
    } else {
        n.to_string()
    }
}
