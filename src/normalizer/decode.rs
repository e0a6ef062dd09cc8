use serde_json::Value;
use std::borrow::Cow;

/// Decode a Gamma field that may carry a JSON document inside a string
/// (`"[\"Yes\",\"No\"]"`). Non-string values are already decoded and are
/// returned as-is.
///
/// Callers treat `Err` as "field is empty"; malformed upstream text never
/// aborts normalization.
pub fn decode_embedded(raw: &Value) -> Result<Cow<'_, Value>, serde_json::Error> {
    match raw {
        Value::String(text) => serde_json::from_str(text).map(Cow::Owned),
        other => Ok(Cow::Borrowed(other)),
    }
}

/// Render a decoded list element as a label.
pub(crate) fn label_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
