//! Re-coding of untyped action payloads into typed parameter records.
//!
//! The payload is whatever JSON the client put under `"params"`. It is
//! deserialized structurally into the record for the action's kind: numeric
//! fields must be numbers, string fields strings, unknown keys are ignored.

use pf_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::kind::ActionKind;

/// Decode `payload` into the parameter record `T` of `kind`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the payload is not an object or a field has
/// the wrong type. Missing fields are not an error here; they surface later
/// as `required` violations.
pub fn decode<T: DeserializeOwned>(kind: ActionKind, payload: &Value) -> Result<T> {
    if !payload.is_object() {
        return Err(Error::decode(
            kind,
            format!("expected an object, got {}", json_type(payload)),
        ));
    }
    serde_json::from_value(payload.clone()).map_err(|e| Error::decode(kind, e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
