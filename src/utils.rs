use crate::error::InertiaError;
use serde::Serialize;
use serde_json::{Map, Value};

#[inline]
pub(crate) fn inertia_err_msg(msg: String) -> String {
    format!("[Inertia] {}", msg)
}

/// Converts a struct of type `T` into a serde_json::Map.
///
/// ## Errors
/// Results in [`InertiaError::SerializationError`] if the struct has any field that does not
/// also implement `Serialize`, or if it doesn't serialize into a JSON object.
pub(crate) fn convert_struct_to_map<T>(s: T) -> Result<Map<String, Value>, InertiaError>
where
    T: Serialize,
{
    let struct_as_value = match serde_json::to_value(s) {
        Ok(value) => value,
        Err(_) => {
            return Err(InertiaError::SerializationError(
                "Struct is not JSON serializable.".into(),
            ))
        }
    };

    match struct_as_value {
        Value::Object(map) => Ok(map),
        other => Err(InertiaError::SerializationError(format!(
            "Failed to serialize struct as map: expected an object, got {}",
            other
        ))),
    }
}

pub(crate) fn convert_struct_to_stringified_json<T>(s: &T) -> Result<String, InertiaError>
where
    T: Serialize,
{
    serde_json::to_string(s).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to serialize map to json: {}", err))
    })
}

/// Decodes a raw query string and encodes it back, keeping the pairs order.
pub(crate) fn reencode_query(query: &str) -> Result<String, InertiaError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to parse query string: {}", err))
    })?;

    serde_urlencoded::to_string(pairs).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to encode query string: {}", err))
    })
}
