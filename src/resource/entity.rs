//! Entity traits and response helpers
//!
//! Each remote resource type is a typed record implementing [`Entity`]. The
//! associated constants carry the endpoint wiring (paths and response keys),
//! the marker traits say which operations the API documents for it.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A remote resource type
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name used in messages, e.g. `Server`
    const KIND: &'static str;
    /// Listing path, also the plural response key, e.g. `servers`
    const COLLECTION: &'static str;
    /// Single-object template, e.g. `servers/{id}`
    const ITEM_PATH: &'static str;
    /// Single-object response key, e.g. `server`
    const SINGULAR: &'static str;

    /// Identifies the resource in messages: its name, or its id without one
    fn label(&self) -> String;
}

/// Entities addressed by a numeric id
pub trait Identified: Entity {
    fn id(&self) -> u64;

    /// A partial record knowing only the id
    fn with_id(id: u64) -> Self;
}

/// Entities that can be updated and deleted
pub trait Mutable: Identified {
    /// Fields the update endpoint accepts
    const UPDATABLE: &'static [&'static str];
}

/// Entities with a create endpoint
pub trait Creatable: Entity {}

/// Entities exposing `<collection>/{id}/actions`
pub trait HasActions: Identified {}

/// Overlay `remote` onto `current` and map the result back onto the typed
/// record.
///
/// Keys the record does not know are dropped; a known key with the wrong
/// shape fails with [`Error::Json`]. Fields missing from `remote` keep their
/// current value.
pub fn merge_fields<T: Entity>(current: &T, remote: Value) -> Result<T> {
    let Value::Object(remote) = remote else {
        return Err(Error::MissingKey(T::SINGULAR.to_string()));
    };

    let mut merged = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in remote {
        merged.insert(key, value);
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Fail with [`Error::Api`] when the body is a structured API error
pub fn check_api_error(response: &Value) -> Result<()> {
    let Some(error) = response.get("error").filter(|e| e.is_object()) else {
        return Ok(());
    };

    let code = error
        .get("code")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();
    let message = error
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("-")
        .to_string();

    Err(Error::Api { code, message })
}

/// Take the value under `key` out of a decoded response
pub fn take_key(response: Value, key: &str) -> Result<Value> {
    check_api_error(&response)?;

    match response {
        Value::Object(mut map) => map
            .remove(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::MissingKey(key.to_string())),
        _ => Err(Error::MissingKey(key.to_string())),
    }
}

/// Drop top-level `null` entries from a request body, so optional arguments
/// left unset are not sent at all
pub(crate) fn without_nulls(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Volume;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_known_fields() {
        let current = Volume::with_id(7);
        let merged = merge_fields(
            &current,
            json!({"id": 7, "name": "data", "size": 10, "not_a_field": true}),
        )
        .unwrap();
        assert_eq!(merged.id, 7);
        assert_eq!(merged.name.as_deref(), Some("data"));
        assert_eq!(merged.size, Some(10));
    }

    #[test]
    fn test_merge_keeps_fields_missing_from_remote() {
        let mut current = Volume::with_id(7);
        current.name = Some("keep".to_string());
        let merged = merge_fields(&current, json!({"size": 50})).unwrap();
        assert_eq!(merged.name.as_deref(), Some("keep"));
        assert_eq!(merged.size, Some(50));
    }

    #[test]
    fn test_merge_rejects_mistyped_field() {
        let current = Volume::with_id(7);
        let err = merge_fields(&current, json!({"size": "huge"})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_take_key_surfaces_api_error() {
        let response = json!({"error": {"code": "not_found", "message": "Volume not found"}});
        let err = take_key(response, "volume").unwrap_err();
        match err {
            Error::Api { code, message } => {
                assert_eq!(code, "not_found");
                assert_eq!(message, "Volume not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_take_key_missing() {
        let err = take_key(json!({"other": 1}), "volume").unwrap_err();
        assert!(matches!(err, Error::MissingKey(ref k) if k == "volume"));
    }

    #[test]
    fn test_without_nulls() {
        let body = without_nulls(json!({"a": null, "b": 1}));
        assert_eq!(body, json!({"b": 1}));
    }
}
