//! List and object responses come either wrapped as `{ success, data }` or
//! bare. These helpers strip the wrapper and reject `success: false`.

use serde_json::Value;

use crate::NormalizeError;

fn is_envelope(body: &Value) -> bool {
    body.as_object().is_some_and(|map| {
        map.contains_key("data")
            && map
                .keys()
                .all(|key| matches!(key.as_str(), "success" | "data" | "message"))
    })
}

fn rejection(body: &Value) -> Option<NormalizeError> {
    match body.get("success") {
        Some(Value::Bool(false)) => Some(NormalizeError::Rejected(
            body.get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string),
        )),
        _ => None,
    }
}

/// Elements of a list response, whichever envelope it used.
pub fn unwrap_list(body: Value) -> Result<Vec<Value>, NormalizeError> {
    if let Some(err) = rejection(&body) {
        return Err(err);
    }

    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) if map.contains_key("data") => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(NormalizeError::NotAList),
        },
        _ => Err(NormalizeError::NotAList),
    }
}

/// The object of a single-entity response, whichever envelope it used.
pub fn unwrap_object(body: Value) -> Result<Value, NormalizeError> {
    if let Some(err) = rejection(&body) {
        return Err(err);
    }

    let inner = if is_envelope(&body) {
        body.get("data").cloned().unwrap_or(Value::Null)
    } else {
        body
    };

    if inner.is_object() {
        Ok(inner)
    } else {
        Err(NormalizeError::NotAnObject)
    }
}

/// Normalizes every element of a list response with `normalize`.
pub fn normalize_list<T>(
    body: Value,
    normalize: impl Fn(&Value) -> Result<T, NormalizeError>,
) -> Result<Vec<T>, NormalizeError> {
    unwrap_list(body)?.iter().map(normalize).collect()
}
