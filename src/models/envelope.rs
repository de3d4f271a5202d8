use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message used when a failed envelope carries no usable `errors` list.
pub const FALLBACK_ERROR_MESSAGE: &str = "API ERROR";

/// Standard response envelope from the Netro API.
///
/// ```json
/// {"status": "OK", "data": {...}, "meta": {...}, "errors": [{"code": ..., "message": ...}]}
/// ```
///
/// The payload under `data` differs per endpoint and per device type, so the
/// envelope keeps the raw JSON object untouched. Nothing is stripped or
/// renamed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// The `status` field, when it is a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// The endpoint-specific payload.
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Pagination and quota metadata.
    pub fn meta(&self) -> Option<&Value> {
        self.0.get("meta")
    }

    /// The raw `errors` field.
    pub fn errors(&self) -> Option<&Value> {
        self.0.get("errors")
    }

    /// Any top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the envelope reports success.
    ///
    /// A missing, `null` or empty `status` counts as success, like `"OK"`.
    pub fn is_ok(&self) -> bool {
        !is_failure_status(self.0.get("status"))
    }

    /// The error message for a failed envelope, or `None` on success.
    ///
    /// Every object in `errors` is rendered as `"<code>: <message>"` and the
    /// entries are joined with `"; "`. Falls back to
    /// [`FALLBACK_ERROR_MESSAGE`] when nothing can be rendered.
    pub fn failure_message(&self) -> Option<String> {
        if self.is_ok() {
            return None;
        }

        let joined = match self.0.get("errors") {
            Some(Value::Array(errors)) => errors
                .iter()
                .filter_map(Value::as_object)
                .map(|e| format!("{}: {}", render(e.get("code")), render(e.get("message"))))
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        };

        if joined.is_empty() {
            Some(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            Some(joined)
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(map: Map<String, Value>) -> Self {
        Envelope(map)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        Value::Object(envelope.0)
    }
}

/// JSON truthiness: anything but `"OK"` that is not empty, zero, false or null.
fn is_failure_status(status: Option<&Value>) -> bool {
    match status {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty() && s != "OK",
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}
