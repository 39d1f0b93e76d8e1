//! The `{code, data, msg}` response envelope every backend reply follows.
//!
//! DESIGN
//! ======
//! `code` 200/201 means `data` is present and usable; any other code means
//! `msg` explains the failure. Nothing reads `data` or `msg` without
//! checking `code` first, and error normalization is total: any shape of
//! `msg` still yields a non-empty display string.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fallback when the server gave no usable failure message.
pub const GENERIC_ERROR: &str = "unknown error";

/// Uniform server response wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Application status code. Some server revisions emit it as a string;
    /// both forms parse.
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub msg: Option<Value>,
}

impl Envelope {
    /// Whether this envelope carries usable `data`.
    pub fn is_success(&self) -> bool {
        matches!(self.code, 200 | 201)
    }

    /// Typed view of `data`. `None` when `data` is absent or does not
    /// match `T`.
    pub fn decode_data<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        let data = self.data.as_ref()?;
        serde_json::from_value(data.clone()).ok()
    }

    /// Normalize `msg` into a single display-ready string.
    ///
    /// Order: a `detail` string inside an object (the 401 shape), then every
    /// string found in a field→messages map joined with commas, then a bare
    /// string, then [`GENERIC_ERROR`].
    pub fn display_message(&self) -> String {
        match &self.msg {
            Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
            Some(Value::Object(fields)) => {
                if let Some(Value::String(detail)) = fields.get("detail") {
                    if !detail.trim().is_empty() {
                        return detail.clone();
                    }
                }
                let mut parts = Vec::new();
                for value in fields.values() {
                    collect_messages(value, &mut parts);
                }
                if parts.is_empty() {
                    GENERIC_ERROR.to_owned()
                } else {
                    parts.join(", ")
                }
            }
            _ => GENERIC_ERROR.to_owned(),
        }
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) if !text.trim().is_empty() => out.push(text.clone()),
        Value::Array(items) => {
            for item in items {
                collect_messages(item, out);
            }
        }
        _ => {}
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom("expected integer status code")),
        Value::String(text) => text
            .parse()
            .map_err(|_| D::Error::custom("expected numeric status code")),
        _ => Err(D::Error::custom("expected number or string status code")),
    }
}
